//! Scene-tree builder.
//!
//! This module turns the untyped parse tree into a [`Scene`]: it applies
//! defaults, normalizes vectors and binds connector endpoints to the
//! positions of named entities.
//!
//! # Name resolution
//!
//! Names live in a single flat [`Registry`] shared by the whole document; a
//! later declaration of a name replaces the earlier entry. Connectors are
//! resolved at two moments:
//!
//! - a group's connectors right after that group's children are built, so
//!   they see every name registered so far in document order, including the
//!   group's own descendants but not later siblings;
//! - the document's top-level connectors after the whole document is built,
//!   so they see every name.
//!
//! A name that matches nothing resolves to the origin and keeps the name.

use std::collections::HashMap;

use log::{debug, info, trace};

use spatex_core::{
    scene::{
        Camera, Connector, ConnectorKind, DEFAULT_BACKGROUND, DEFAULT_CAMERA_ANGLE,
        DEFAULT_CAMERA_TARGET, DEFAULT_CAMERA_ZOOM, DEFAULT_CONNECTOR_COLOR,
        DEFAULT_CONNECTOR_THICKNESS, Group, Ref, Scene, SceneNode, Shape,
    },
    value::Value,
    vector::{Vec3, normalize_vec},
};

use crate::parser_types::ParseNode;

/// Scene-wide mapping from declared names to the position of the entity
/// that was last declared with that name.
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<String, Vec3>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` at `pos`, replacing any earlier entry.
    pub fn register(&mut self, name: &str, pos: Vec3) {
        if self.entries.insert(name.to_string(), pos).is_some() {
            debug!(name; "Name redeclared; later declaration wins");
        }
    }

    /// Position of the entity registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<Vec3> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// How a block is interpreted, by its type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeClass {
    Camera,
    Connector(ConnectorKind),
    Group,
    Shape,
}

fn classify(node_type: &str) -> NodeClass {
    match node_type {
        "camera" => NodeClass::Camera,
        "group" => NodeClass::Group,
        other => ConnectorKind::from_name(other).map_or(NodeClass::Shape, NodeClass::Connector),
    }
}

/// Text of a value, treating an empty string like an absent one.
fn non_empty_text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_text).filter(|text| !text.is_empty())
}

/// State owned by one build call and threaded through the recursion.
struct BuildContext {
    registry: Registry,
}

impl BuildContext {
    fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Build a group: its own transform, its children in order, then its
    /// connectors. The group's name is registered last.
    fn build_group(&mut self, node: &ParseNode) -> Group {
        let mut group = Group {
            name: node.name.clone(),
            pos: normalize_vec(node.property("pos"), None),
            rotate: normalize_vec(node.property("rotate"), None),
            children: Vec::new(),
            connectors: Vec::new(),
        };

        let mut deferred = Vec::new();
        for child in &node.children {
            match classify(&child.node_type) {
                NodeClass::Connector(kind) => deferred.push((kind, child)),
                NodeClass::Group => group.children.push(SceneNode::Group(self.build_group(child))),
                NodeClass::Camera | NodeClass::Shape => {
                    group.children.push(SceneNode::Shape(self.build_shape(child)))
                }
            }
        }

        group.connectors = deferred
            .into_iter()
            .map(|(kind, child)| self.build_connector(kind, child))
            .collect();

        if let Some(name) = &group.name {
            self.registry.register(name, group.pos);
        }
        debug!(
            name:? = group.name,
            children = group.children.len(),
            connectors = group.connectors.len();
            "Built group"
        );
        group
    }

    /// Build a shape: universal defaults, then type defaults, then every
    /// declared property.
    fn build_shape(&mut self, node: &ParseNode) -> Shape {
        let mut shape = Shape::with_defaults(&node.node_type, node.name.clone());
        if shape.kind().is_none() {
            debug!(shape_type = node.node_type.as_str(); "Shape type outside the catalog");
        }

        for (key, value) in &node.properties {
            if !shape.apply_property(key, value) {
                trace!(key = key.as_str(), value:% = value; "Kept property verbatim");
            }
        }
        if !node.children.is_empty() {
            debug!(
                shape_type = node.node_type.as_str(),
                count = node.children.len();
                "Ignoring blocks nested in a shape"
            );
        }

        if let Some(name) = &shape.name {
            self.registry.register(name, shape.pos);
        }
        shape
    }

    /// Build a connector, resolving both endpoints against the registry as
    /// it stands now.
    fn build_connector(&self, kind: ConnectorKind, node: &ParseNode) -> Connector {
        let thickness = match node.property("thickness") {
            None => DEFAULT_CONNECTOR_THICKNESS,
            Some(value) => value.as_num().unwrap_or_else(|| {
                debug!(value:% = value; "Connector thickness is not a number; using default");
                DEFAULT_CONNECTOR_THICKNESS
            }),
        };

        Connector {
            kind,
            name: node.name.clone(),
            from: resolve_ref(node.property("from"), &self.registry),
            to: resolve_ref(node.property("to"), &self.registry),
            color: non_empty_text(node.property("color"))
                .unwrap_or(DEFAULT_CONNECTOR_COLOR)
                .to_string(),
            thickness,
            label: non_empty_text(node.property("label")).map(str::to_string),
        }
    }
}

/// Build a camera from a `camera { ... }` block's properties.
fn build_camera(node: &ParseNode) -> Camera {
    Camera {
        angle: normalize_vec(node.property("angle"), Some(DEFAULT_CAMERA_ANGLE)),
        zoom: node
            .property("zoom")
            .and_then(Value::as_num)
            .unwrap_or(DEFAULT_CAMERA_ZOOM),
        target: normalize_vec(node.property("target"), Some(DEFAULT_CAMERA_TARGET)),
    }
}

/// Resolve a connector endpoint.
///
/// - text naming a registered entity binds to a copy of its position;
/// - a number vector is a literal point;
/// - a single number `n` is the point `[n, 0, 0]`;
/// - text naming nothing keeps the name and sits at the origin;
/// - anything else, including a missing value, is the origin.
pub fn resolve_ref(value: Option<&Value>, registry: &Registry) -> Ref {
    match value {
        Some(Value::Vec(_)) => Ref::point(normalize_vec(value, None)),
        Some(Value::Num(n)) => Ref::point([*n, 0.0, 0.0]),
        Some(v) => match v.as_text() {
            Some(name) => match registry.lookup(name) {
                Some(pos) => Ref::named(name, pos),
                None => {
                    debug!(name; "Unresolved connector reference; using origin");
                    Ref::named(name, [0.0; 3])
                }
            },
            None => Ref::default(),
        },
        None => Ref::default(),
    }
}

/// Build the scene tree from a parsed `scene { ... }` document.
///
/// This never fails: unknown shape types and property keys pass through,
/// and unresolved references fall back to the origin.
pub fn build(document: &ParseNode) -> Scene {
    info!("Building scene tree");

    let mut scene = Scene {
        background: non_empty_text(document.property("background"))
            .unwrap_or(DEFAULT_BACKGROUND)
            .to_string(),
        fog: document
            .property("fog")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        ..Scene::default()
    };

    let mut cx = BuildContext::new();
    let mut deferred = Vec::new();

    for child in &document.children {
        match classify(&child.node_type) {
            NodeClass::Camera => scene.camera = build_camera(child),
            NodeClass::Connector(kind) => deferred.push((kind, child)),
            NodeClass::Group => scene.objects.push(SceneNode::Group(cx.build_group(child))),
            NodeClass::Shape => scene.objects.push(SceneNode::Shape(cx.build_shape(child))),
        }
    }

    scene.connectors = deferred
        .into_iter()
        .map(|(kind, child)| cx.build_connector(kind, child))
        .collect();

    info!(
        objects = scene.objects.len(),
        connectors = scene.connectors.len(),
        names = cx.registry.len();
        "Scene tree built"
    );
    scene
}
