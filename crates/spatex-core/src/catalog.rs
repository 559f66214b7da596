//! The built-in shape catalog.
//!
//! Every known shape type has a [`ShapeKind`] and a fresh set of
//! type-specific parameters produced by [`ShapeKind::default_geometry`].
//! Shape types outside the catalog are still accepted by the builder; they
//! simply get no type-specific parameters.

use std::fmt;

use crate::value::Value;

/// Color applied to every shape that declares none.
pub const DEFAULT_SHAPE_COLOR: &str = "#cccccc";

/// Opacity applied to every shape that declares none.
pub const DEFAULT_OPACITY: f64 = 1.0;

/// Known shape types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cube,
    Cuboid,
    Sphere,
    Hemisphere,
    Cylinder,
    HollowCylinder,
    Cone,
    HollowCone,
    Square,
    Rectangle,
    Circle,
    Semicircle,
    Triangle,
    Plane,
}

impl ShapeKind {
    /// All catalog entries, in declaration order.
    pub const ALL: [ShapeKind; 14] = [
        ShapeKind::Cube,
        ShapeKind::Cuboid,
        ShapeKind::Sphere,
        ShapeKind::Hemisphere,
        ShapeKind::Cylinder,
        ShapeKind::HollowCylinder,
        ShapeKind::Cone,
        ShapeKind::HollowCone,
        ShapeKind::Square,
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Semicircle,
        ShapeKind::Triangle,
        ShapeKind::Plane,
    ];

    /// Look up a shape type by its source name, e.g. `hollow_cone`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The source name of this shape type.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Cuboid => "cuboid",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Hemisphere => "hemisphere",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::HollowCylinder => "hollow_cylinder",
            ShapeKind::Cone => "cone",
            ShapeKind::HollowCone => "hollow_cone",
            ShapeKind::Square => "square",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Semicircle => "semicircle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Plane => "plane",
        }
    }

    /// A fresh copy of this type's default parameters.
    pub fn default_geometry(self) -> Geometry {
        match self {
            ShapeKind::Cube | ShapeKind::Square | ShapeKind::Triangle => {
                Geometry::Size { size: 1.0 }
            }
            ShapeKind::Sphere | ShapeKind::Hemisphere | ShapeKind::Circle | ShapeKind::Semicircle => {
                Geometry::Radius { radius: 1.0 }
            }
            ShapeKind::Cuboid => Geometry::Cuboid {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            ShapeKind::Cylinder | ShapeKind::Cone => Geometry::RadiusHeight {
                radius: 1.0,
                height: 2.0,
            },
            ShapeKind::HollowCylinder | ShapeKind::HollowCone => Geometry::Hollow {
                radius: 1.0,
                inner_radius: 0.5,
                height: 2.0,
                thickness: None,
            },
            ShapeKind::Rectangle => Geometry::Extent {
                width: 2.0,
                height: 1.0,
            },
            ShapeKind::Plane => Geometry::Extent {
                width: 10.0,
                height: 10.0,
            },
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type-specific shape parameters.
///
/// Variants group the catalog by the parameter set they share; the shape's
/// own type tag says which concrete shape it is. `Hollow::thickness` has no
/// default and stays `None` until declared.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Geometry {
    Size {
        size: f64,
    },
    Radius {
        radius: f64,
    },
    Cuboid {
        width: f64,
        height: f64,
        depth: f64,
    },
    RadiusHeight {
        radius: f64,
        height: f64,
    },
    Hollow {
        radius: f64,
        inner_radius: f64,
        height: f64,
        thickness: Option<f64>,
    },
    Extent {
        width: f64,
        height: f64,
    },
    /// Shape type outside the catalog.
    #[default]
    None,
}

impl Geometry {
    /// Parameter names and values, in a stable order.
    pub fn params(&self) -> Vec<(&'static str, Option<f64>)> {
        match *self {
            Geometry::Size { size } => vec![("size", Some(size))],
            Geometry::Radius { radius } => vec![("radius", Some(radius))],
            Geometry::Cuboid {
                width,
                height,
                depth,
            } => vec![
                ("width", Some(width)),
                ("height", Some(height)),
                ("depth", Some(depth)),
            ],
            Geometry::RadiusHeight { radius, height } => {
                vec![("radius", Some(radius)), ("height", Some(height))]
            }
            Geometry::Hollow {
                radius,
                inner_radius,
                height,
                thickness,
            } => vec![
                ("radius", Some(radius)),
                ("inner_radius", Some(inner_radius)),
                ("height", Some(height)),
                ("thickness", thickness),
            ],
            Geometry::Extent { width, height } => {
                vec![("width", Some(width)), ("height", Some(height))]
            }
            Geometry::None => Vec::new(),
        }
    }

    /// Look up a parameter by name.
    ///
    /// Returns `None` when this geometry has no such parameter, and
    /// `Some(None)` for a declared-but-unset parameter such as `thickness`.
    pub fn get(&self, key: &str) -> Option<Option<f64>> {
        let value = match (self, key) {
            (Geometry::Size { size }, "size") => size,
            (
                Geometry::Radius { radius }
                | Geometry::RadiusHeight { radius, .. }
                | Geometry::Hollow { radius, .. },
                "radius",
            ) => radius,
            (Geometry::Cuboid { width, .. } | Geometry::Extent { width, .. }, "width") => width,
            (
                Geometry::Cuboid { height, .. }
                | Geometry::RadiusHeight { height, .. }
                | Geometry::Hollow { height, .. }
                | Geometry::Extent { height, .. },
                "height",
            ) => height,
            (Geometry::Cuboid { depth, .. }, "depth") => depth,
            (Geometry::Hollow { inner_radius, .. }, "inner_radius") => inner_radius,
            (Geometry::Hollow { thickness, .. }, "thickness") => return Some(*thickness),
            _ => return None,
        };
        Some(Some(*value))
    }

    /// Returns `true` if `key` names a parameter of this geometry.
    pub fn has_param(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Overwrite a parameter from a declared value.
    ///
    /// Only numbers are accepted. Returns `false` when the key is not a
    /// parameter of this geometry or the value is not a number, leaving the
    /// geometry unchanged.
    pub fn set(&mut self, key: &str, value: &Value) -> bool {
        let Some(n) = value.as_num() else {
            return false;
        };
        let slot = match (self, key) {
            (Geometry::Size { size }, "size") => size,
            (Geometry::Radius { radius }, "radius")
            | (Geometry::RadiusHeight { radius, .. }, "radius")
            | (Geometry::Hollow { radius, .. }, "radius") => radius,
            (Geometry::Cuboid { width, .. }, "width") | (Geometry::Extent { width, .. }, "width") => {
                width
            }
            (Geometry::Cuboid { height, .. }, "height")
            | (Geometry::RadiusHeight { height, .. }, "height")
            | (Geometry::Hollow { height, .. }, "height")
            | (Geometry::Extent { height, .. }, "height") => height,
            (Geometry::Cuboid { depth, .. }, "depth") => depth,
            (Geometry::Hollow { inner_radius, .. }, "inner_radius") => inner_radius,
            (Geometry::Hollow { thickness, .. }, "thickness") => {
                *thickness = Some(n);
                return true;
            }
            _ => return false,
        };
        *slot = n;
        true
    }
}
