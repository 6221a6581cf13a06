use std::sync::Arc;

use super::{mesh::MeshResource, object::SceneObject};

/// Stable reference to an object in a [`Scene`].
///
/// Objects are never removed, so a handle stays valid for the lifetime of the
/// scene that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(usize);

impl ObjectHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Insertion-ordered, append-only collection of scene objects
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an object with a default transform and returns its handle.
    pub fn create_object(&mut self, mesh: Option<Arc<MeshResource>>) -> ObjectHandle {
        let handle = ObjectHandle(self.objects.len());
        let name = match &mesh {
            Some(mesh) => self.unique_name(mesh.name()),
            None => format!("object_{}", handle.0),
        };

        self.objects.push(SceneObject::new(name, mesh));
        handle
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(handle.0)
    }

    pub fn object_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneObject> {
        self.objects.get_mut(handle.0)
    }

    pub fn first_mut(&mut self) -> Option<&mut SceneObject> {
        self.objects.first_mut()
    }

    /// Objects in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, SceneObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, SceneObject> {
        self.objects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn statistics(&self) -> SceneStatistics {
        let meshes = self.objects.iter().filter_map(SceneObject::mesh);

        let (total_vertices, total_triangles) = meshes.fold((0, 0), |(v, t), mesh| {
            (v + mesh.vertex_count(), t + mesh.triangle_count())
        });

        SceneStatistics {
            object_count: self.objects.len(),
            renderable_count: self.objects.iter().filter(|o| o.is_renderable()).count(),
            total_vertices,
            total_triangles,
        }
    }

    fn unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut candidate = desired_name.to_string();

        while self.objects.iter().any(|obj| obj.name == candidate) {
            counter += 1;
            candidate = format!("{} ({})", desired_name, counter);
        }

        candidate
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a SceneObject;
    type IntoIter = std::slice::Iter<'a, SceneObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Scene statistics for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub renderable_count: usize,
    pub total_vertices: u32,
    pub total_triangles: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::mesh::test_support::triangle_mesh;

    #[test]
    fn test_create_object_appends_in_call_order() {
        let mut scene = Scene::new();
        let mesh = triangle_mesh(1.0);

        let handles: Vec<_> = (0..5)
            .map(|i| {
                let handle = scene.create_object(if i % 2 == 0 { Some(mesh.clone()) } else { None });
                scene
                    .object_mut(handle)
                    .unwrap()
                    .set_position(i as f32, 0.0, 0.0);
                handle
            })
            .collect();

        assert_eq!(scene.len(), 5);
        for (i, object) in scene.iter().enumerate() {
            assert_eq!(object.position().x, i as f32);
        }
        for (i, handle) in handles.iter().enumerate() {
            assert_eq!(handle.index(), i);
        }
    }

    #[test]
    fn test_create_object_attaches_optional_mesh() {
        let mut scene = Scene::new();
        let with_mesh = scene.create_object(Some(triangle_mesh(1.0)));
        let without_mesh = scene.create_object(None);

        assert!(scene.object(with_mesh).unwrap().mesh().is_some());
        assert!(scene.object(without_mesh).unwrap().mesh().is_none());
        assert!(!scene.object(without_mesh).unwrap().is_renderable());
    }

    #[test]
    fn test_objects_share_one_mesh() {
        let mut scene = Scene::new();
        let mesh = triangle_mesh(1.0);
        scene.create_object(Some(mesh.clone()));
        scene.create_object(Some(mesh.clone()));

        assert_eq!(Arc::strong_count(&mesh), 3);
        let names: Vec<_> = scene.iter().map(|o| o.name.clone()).collect();
        assert_eq!(names, vec!["triangle".to_string(), "triangle (1)".to_string()]);
    }

    #[test]
    fn test_first_mut_and_empty_scene() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.first_mut().is_none());

        scene.create_object(None);
        scene.first_mut().unwrap().set_uniform_scale(2.0);
        assert_eq!(scene.iter().next().unwrap().transform().scale().y, 2.0);
    }

    #[test]
    fn test_statistics() {
        let mut scene = Scene::new();
        let mesh = triangle_mesh(1.0);
        scene.create_object(Some(mesh.clone()));
        let hidden = scene.create_object(Some(mesh));
        scene.object_mut(hidden).unwrap().visible = false;
        scene.create_object(None);

        let stats = scene.statistics();
        assert_eq!(stats.object_count, 3);
        assert_eq!(stats.renderable_count, 1);
        assert_eq!(stats.total_vertices, 6);
        assert_eq!(stats.total_triangles, 2);
    }
}
