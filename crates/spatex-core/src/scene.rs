//! The normalized scene tree.
//!
//! This is the contract boundary toward renderers. Every vector has its exact
//! length, every shape carries its full attribute set, and every connector
//! endpoint is already a resolved point.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ tokenizer
//! Tokens
//!     ↓ parser
//! Parse Tree (untyped blocks and properties)
//!     ↓ builder
//! Scene (these types)
//!     ↓ renderer (external)
//! Pixels
//! ```
//!
//! The JSON form uses `"type"` for type tags and `"ref"` for the bound name
//! of a connector endpoint.

use indexmap::IndexMap;
use serde::{
    Serialize,
    ser::{SerializeMap, Serializer},
};

use crate::{
    catalog::{DEFAULT_OPACITY, DEFAULT_SHAPE_COLOR, Geometry, ShapeKind},
    value::Value,
    vector::{Vec2, Vec3, normalize_vec},
};

/// Scene background when none is declared.
pub const DEFAULT_BACKGROUND: &str = "#000000";

/// Camera angle (azimuth, elevation in degrees) when none is declared.
pub const DEFAULT_CAMERA_ANGLE: Vec2 = [45.0, 30.0];

/// Camera zoom when none is declared.
pub const DEFAULT_CAMERA_ZOOM: f64 = 1.0;

/// Camera target when none is declared.
pub const DEFAULT_CAMERA_TARGET: Vec3 = [0.0, 0.0, 0.0];

/// Connector color when none is declared.
pub const DEFAULT_CONNECTOR_COLOR: &str = "#ffffff";

/// Connector thickness when none is declared.
pub const DEFAULT_CONNECTOR_THICKNESS: f64 = 1.0;

/// Root of the scene tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "scene")]
pub struct Scene {
    pub background: String,
    pub fog: bool,
    pub camera: Camera,
    pub objects: Vec<SceneNode>,
    pub connectors: Vec<Connector>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            fog: false,
            camera: Camera::default(),
            objects: Vec::new(),
            connectors: Vec::new(),
        }
    }
}

impl Scene {
    /// Depth-first iterator over every shape in the scene, groups included.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        let mut stack: Vec<&SceneNode> = self.objects.iter().rev().collect();
        std::iter::from_fn(move || {
            while let Some(node) = stack.pop() {
                match node {
                    SceneNode::Shape(shape) => return Some(shape),
                    SceneNode::Group(group) => stack.extend(group.children.iter().rev()),
                }
            }
            None
        })
    }
}

/// Orbit camera parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Camera {
    /// Azimuth and elevation, in degrees.
    pub angle: Vec2,
    pub zoom: f64,
    pub target: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            angle: DEFAULT_CAMERA_ANGLE,
            zoom: DEFAULT_CAMERA_ZOOM,
            target: DEFAULT_CAMERA_TARGET,
        }
    }
}

/// An entry in an object list: either a drawable shape or a group of nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SceneNode {
    Shape(Shape),
    Group(Group),
}

impl SceneNode {
    /// The declared name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            SceneNode::Shape(shape) => shape.name.as_deref(),
            SceneNode::Group(group) => group.name.as_deref(),
        }
    }

    /// The node's own position, local to its parent.
    pub fn pos(&self) -> Vec3 {
        match self {
            SceneNode::Shape(shape) => shape.pos,
            SceneNode::Group(group) => group.pos,
        }
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            SceneNode::Shape(shape) => Some(shape),
            SceneNode::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            SceneNode::Group(group) => Some(group),
            SceneNode::Shape(_) => None,
        }
    }
}

/// A drawable primitive.
///
/// `shape_type` is kept as written so types outside the catalog reach the
/// renderer unchanged. Declared properties that have no typed slot, or whose
/// value does not fit the slot, are kept verbatim in `extras`. An `extras`
/// entry overrides the typed field of the same key: [`Shape::param`] reports
/// it as unset and the JSON form carries only the verbatim value.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub shape_type: String,
    pub name: Option<String>,
    pub pos: Vec3,
    /// Euler angles, in degrees.
    pub rotate: Vec3,
    pub color: String,
    pub opacity: f64,
    pub wireframe: bool,
    pub shadow: bool,
    pub label: Option<String>,
    pub geometry: Geometry,
    pub extras: IndexMap<String, Value>,
}

impl Shape {
    /// A shape of the given type with every default applied.
    ///
    /// Universal defaults come first, then the catalog parameters for the
    /// type. Unknown types get universal defaults only.
    pub fn with_defaults(shape_type: &str, name: Option<String>) -> Self {
        let geometry = ShapeKind::from_name(shape_type)
            .map(ShapeKind::default_geometry)
            .unwrap_or_default();

        Self {
            shape_type: shape_type.to_string(),
            name,
            pos: [0.0; 3],
            rotate: [0.0; 3],
            color: DEFAULT_SHAPE_COLOR.to_string(),
            opacity: DEFAULT_OPACITY,
            wireframe: false,
            shadow: false,
            label: None,
            geometry,
            extras: IndexMap::new(),
        }
    }

    /// The catalog entry for this shape, if it is a known type.
    pub fn kind(&self) -> Option<ShapeKind> {
        ShapeKind::from_name(&self.shape_type)
    }

    /// Overlay one declared property.
    ///
    /// Returns `true` when the value landed in a typed slot and `false` when
    /// it was kept in `extras` instead.
    pub fn apply_property(&mut self, key: &str, value: &Value) -> bool {
        let slotted = match key {
            "pos" => {
                self.pos = normalize_vec(Some(value), None);
                true
            }
            "rotate" => {
                self.rotate = normalize_vec(Some(value), None);
                true
            }
            "color" => value.as_text().map(|c| self.color = c.to_string()).is_some(),
            "label" => value
                .as_text()
                .map(|l| self.label = Some(l.to_string()))
                .is_some(),
            "opacity" => value.as_num().map(|o| self.opacity = o).is_some(),
            "wireframe" => value.as_bool().map(|w| self.wireframe = w).is_some(),
            "shadow" => value.as_bool().map(|s| self.shadow = s).is_some(),
            _ => self.geometry.set(key, value),
        };

        if slotted {
            self.extras.shift_remove(key);
        } else {
            self.extras.insert(key.to_string(), value.clone());
        }
        slotted
    }

    /// A type-specific parameter, e.g. `size` or `radius`.
    ///
    /// Returns `None` when the parameter is unset or was overridden by a
    /// non-numeric value held in `extras`.
    pub fn param(&self, key: &str) -> Option<f64> {
        if self.extras.contains_key(key) {
            return None;
        }
        self.geometry.get(key).flatten()
    }

    /// Returns `true` if `key` is one of this shape's typed fields.
    fn is_typed_key(&self, key: &str) -> bool {
        FIXED_KEYS.contains(&key) || self.geometry.has_param(key)
    }
}

/// Keys every shape serializes before its geometry parameters.
const FIXED_KEYS: [&str; 9] = [
    "type",
    "name",
    "pos",
    "rotate",
    "color",
    "opacity",
    "wireframe",
    "shadow",
    "label",
];

/// Write `key` with the verbatim value from `extras` if there is one, and
/// the typed value otherwise.
fn serialize_slot<M, T>(
    map: &mut M,
    extras: &IndexMap<String, Value>,
    key: &str,
    typed: &T,
) -> Result<(), M::Error>
where
    M: SerializeMap,
    T: Serialize + ?Sized,
{
    match extras.get(key) {
        Some(verbatim) => map.serialize_entry(key, verbatim),
        None => map.serialize_entry(key, typed),
    }
}

impl Serialize for Shape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let params = self.geometry.params();
        let untyped: Vec<_> = self
            .extras
            .iter()
            .filter(|(key, _)| !self.is_typed_key(key))
            .collect();

        let extras = &self.extras;
        let mut map = serializer.serialize_map(Some(FIXED_KEYS.len() + params.len() + untyped.len()))?;
        serialize_slot(&mut map, extras, "type", &self.shape_type)?;
        serialize_slot(&mut map, extras, "name", &self.name)?;
        serialize_slot(&mut map, extras, "pos", &self.pos)?;
        serialize_slot(&mut map, extras, "rotate", &self.rotate)?;
        serialize_slot(&mut map, extras, "color", &self.color)?;
        serialize_slot(&mut map, extras, "opacity", &self.opacity)?;
        serialize_slot(&mut map, extras, "wireframe", &self.wireframe)?;
        serialize_slot(&mut map, extras, "shadow", &self.shadow)?;
        serialize_slot(&mut map, extras, "label", &self.label)?;
        for (key, value) in &params {
            serialize_slot(&mut map, extras, key, value)?;
        }
        for (key, value) in untyped {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A container of nodes with its own local transform.
///
/// `pos` and `rotate` are relative to the parent and are never folded into
/// the children's own fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename = "group")]
pub struct Group {
    pub name: Option<String>,
    pub pos: Vec3,
    pub rotate: Vec3,
    pub children: Vec<SceneNode>,
    pub connectors: Vec<Connector>,
}

/// How a connector is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    Arrow,
    Line,
}

impl ConnectorKind {
    /// Look up a connector kind by its source name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "arrow" => Some(ConnectorKind::Arrow),
            "line" => Some(ConnectorKind::Line),
            _ => None,
        }
    }
}

/// An edge drawn between two resolved points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connector {
    #[serde(rename = "type")]
    pub kind: ConnectorKind,
    pub name: Option<String>,
    pub from: Ref,
    pub to: Ref,
    pub color: String,
    pub thickness: f64,
    pub label: Option<String>,
}

/// A resolved connector endpoint.
///
/// `pos` is a copy of the target's position taken when the connector was
/// resolved. `bound_name` is kept even when the name matched nothing, in
/// which case `pos` is the origin.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Ref {
    #[serde(rename = "ref")]
    pub bound_name: Option<String>,
    pub pos: Vec3,
}

impl Ref {
    /// An endpoint bound to a named entity.
    pub fn named(name: impl Into<String>, pos: Vec3) -> Self {
        Self {
            bound_name: Some(name.into()),
            pos,
        }
    }

    /// An endpoint given as a literal point.
    pub fn point(pos: Vec3) -> Self {
        Self {
            bound_name: None,
            pos,
        }
    }
}
