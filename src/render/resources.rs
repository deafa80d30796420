use tracing::warn;

/// Handle to one GPU-side geometry buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(u32);

impl GeometryHandle {
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Handle to one GPU-side material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(u32);

impl MaterialHandle {
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Registry of GPU-side resources living behind one surface binding.
///
/// Allocation and release are tracked explicitly so "dispose once, dispose
/// fully" is checkable by inspecting this one record: after disposal the
/// pool is drained and `double_releases` stays zero.
#[derive(Debug, Default)]
pub struct ResourcePool {
    geometries: Vec<bool>,
    materials: Vec<bool>,
    double_releases: usize,
}

impl ResourcePool {
    pub fn alloc_geometry(&mut self) -> GeometryHandle {
        let handle = GeometryHandle(self.geometries.len() as u32);
        self.geometries.push(true);
        handle
    }

    pub fn alloc_material(&mut self) -> MaterialHandle {
        let handle = MaterialHandle(self.materials.len() as u32);
        self.materials.push(true);
        handle
    }

    pub fn release_geometry(&mut self, handle: GeometryHandle) {
        match self.geometries.get_mut(handle.0 as usize) {
            Some(alive) if *alive => *alive = false,
            _ => {
                self.double_releases += 1;
                warn!(handle = handle.0, "geometry released twice");
            }
        }
    }

    pub fn release_material(&mut self, handle: MaterialHandle) {
        match self.materials.get_mut(handle.0 as usize) {
            Some(alive) if *alive => *alive = false,
            _ => {
                self.double_releases += 1;
                warn!(handle = handle.0, "material released twice");
            }
        }
    }

    #[must_use]
    pub fn alive_geometries(&self) -> usize {
        self.geometries.iter().filter(|alive| **alive).count()
    }

    #[must_use]
    pub fn alive_materials(&self) -> usize {
        self.materials.iter().filter(|alive| **alive).count()
    }

    #[must_use]
    pub fn alive_total(&self) -> usize {
        self.alive_geometries() + self.alive_materials()
    }

    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.alive_total() == 0
    }

    #[must_use]
    pub fn double_releases(&self) -> usize {
        self.double_releases
    }
}
