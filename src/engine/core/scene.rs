//! The render-side scene description.
//!
//! A [`Scene`] is nothing more than a flat collection of [`SceneObject`]s and the
//! lights that illuminate them. The renderer reads it once per frame, the
//! physics sync writes object transforms into it.

use crate::core::Transform;
use log::info;
use nalgebra::{UnitQuaternion, Vector3};
use slotmap::{HopSlotMap, new_key_type};
use std::f32::consts::FRAC_PI_2;

new_key_type! {
    /// Handle to a [`SceneObject`] stored in a [`Scene`].
    pub struct ObjectId;
}

/// Which shared unit mesh an object is drawn with.
///
/// Spheres have radius 1, cubes have an edge length of 1 and planes span
/// 1x1 in the local XY plane facing +Z. Objects scale them to size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Sphere,
    Cube,
    Plane,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub color: Vector3<f32>,
    pub metalness: f32,
    pub roughness: f32,
}

impl Material {
    pub const fn new(color: Vector3<f32>, metalness: f32, roughness: f32) -> Self {
        Material {
            color,
            metalness,
            roughness,
        }
    }

    /// Builds a material from a `0xRRGGBB` color.
    pub fn from_hex(hex: u32, metalness: f32, roughness: f32) -> Self {
        Material::new(hex_to_rgb(hex), metalness, roughness)
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::from_hex(0xffffff, 0.3, 0.4)
    }
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub mesh: MeshKind,
    pub transform: Transform,
    pub material: Material,
    /// Shadow flags are kept as scene metadata. The forward renderer draws
    /// no shadows and ignores them.
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl SceneObject {
    pub fn new<S: Into<String>>(name: S, mesh: MeshKind, material: Material) -> Self {
        SceneObject {
            name: name.into(),
            mesh,
            transform: Transform::new(),
            material,
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AmbientLight {
    pub color: Vector3<f32>,
    pub intensity: f32,
}

/// A light infinitely far away, shining from `position` towards the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    pub color: Vector3<f32>,
    pub intensity: f32,
    pub position: Vector3<f32>,
    /// Metadata only, see [`SceneObject::cast_shadow`].
    pub cast_shadow: bool,
}

impl DirectionalLight {
    /// Normalized direction pointing from the lit surface towards the light.
    pub fn direction_to_light(&self) -> Vector3<f32> {
        self.position
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::y)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Lighting {
            ambient: AmbientLight {
                color: hex_to_rgb(0xffffff),
                intensity: 0.7,
            },
            directional: DirectionalLight {
                color: hex_to_rgb(0xffffff),
                intensity: 0.2,
                position: Vector3::new(5.0, 5.0, 5.0),
                cast_shadow: true,
            },
        }
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    objects: HopSlotMap<ObjectId, SceneObject>,
    pub lighting: Lighting,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        self.objects.insert(object)
    }

    /// Removes an object from the scene, returning it if it was still present.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.objects.remove(id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter()
    }

    /// Finds an object by its name
    ///
    /// Note: If multiple objects have the same name, only the first one found will be returned.
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, o)| o.name == name)
            .map(|(id, _)| id)
    }

    /// Adds the ground: a `size` x `size` plane lying flat on y = 0.
    pub fn add_floor(&mut self, size: f32) -> ObjectId {
        let mut floor = SceneObject::new(
            "Floor",
            MeshKind::Plane,
            Material::from_hex(0x777777, 0.3, 0.4),
        );
        floor.receive_shadow = true;
        floor
            .transform
            .set_rotation(UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2));
        floor
            .transform
            .set_nonuniform_scale(Vector3::new(size, size, 1.0));

        self.add(floor)
    }

    /// Prints all objects of the scene to the log
    pub fn print_objects(&self) {
        info!("{} objects in scene.", self.objects.len());
        for (_, object) in &self.objects {
            let pos = object.transform.position();
            info!(
                "- {} ({:?}) at [{:.2}, {:.2}, {:.2}]",
                object.name, object.mesh, pos.x, pos.y, pos.z
            );
        }
    }
}

pub fn hex_to_rgb(hex: u32) -> Vector3<f32> {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vector3::new(r, g, b)
}
