//! Taffy Bridge - wrapper geometry from the Taffy layout engine
//!
//! For hosts without a browser layout engine, the caret wrapper is laid out
//! by Taffy: a box with padding and border around one content leaf (the
//! input's text line). Resolved padding, border and the border-box rect come
//! back as [`ContainerGeometry`].

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, LengthPercentage, Rect as TaffyRect, Size,
    Style, TaffyTree,
};

use crate::error::CaretError;
use crate::host::ContainerElement;
use crate::types::{ContainerGeometry, Edges, Rect};

// =============================================================================
// BOX STYLE
// =============================================================================

/// Style of the wrapper box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStyle {
    /// Border-box width (None = fit content)
    pub width: Option<f32>,
    /// Border-box height (None = fit content)
    pub height: Option<f32>,
    pub padding: Edges,
    pub border: Edges,
    /// Size of the input's text line inside the box.
    pub content: (f32, f32),
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            padding: Edges::ZERO,
            border: Edges::ZERO,
            content: (0.0, 0.0),
        }
    }
}

// =============================================================================
// CONVERSION
// =============================================================================

/// Convert an optional length to Taffy's Dimension.
fn to_taffy_dimension(value: Option<f32>) -> TaffyDimension {
    match value {
        Some(n) => TaffyDimension::Length(n),
        None => TaffyDimension::Auto,
    }
}

fn to_taffy_edges(edges: Edges) -> TaffyRect<LengthPercentage> {
    TaffyRect {
        top: LengthPercentage::Length(edges.top),
        right: LengthPercentage::Length(edges.right),
        bottom: LengthPercentage::Length(edges.bottom),
        left: LengthPercentage::Length(edges.left),
    }
}

fn from_taffy_edges(rect: TaffyRect<f32>) -> Edges {
    Edges::new(rect.top, rect.right, rect.bottom, rect.left)
}

// =============================================================================
// TAFFY CONTAINER
// =============================================================================

/// Wrapper element laid out by Taffy on every geometry query.
#[derive(Debug, Clone, Default)]
pub struct TaffyContainer {
    box_style: BoxStyle,
    /// Position of the wrapper in the host's coordinate space.
    origin: (f32, f32),
    class: String,
    style: String,
}

impl TaffyContainer {
    pub fn new(box_style: BoxStyle) -> Self {
        Self {
            box_style,
            ..Default::default()
        }
    }

    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = (x, y);
        self
    }

    pub fn box_style(&self) -> &BoxStyle {
        &self.box_style
    }

    pub fn set_box_style(&mut self, box_style: BoxStyle) {
        self.box_style = box_style;
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    /// Run Taffy over the wrapper and its content leaf.
    pub fn compute(&self) -> Result<ContainerGeometry, CaretError> {
        let style = &self.box_style;
        let mut tree: TaffyTree<()> = TaffyTree::new();

        let content = tree.new_leaf(Style {
            size: Size {
                width: TaffyDimension::Length(style.content.0),
                height: TaffyDimension::Length(style.content.1),
            },
            flex_shrink: 0.0,
            ..Default::default()
        })?;

        let root = tree.new_with_children(
            Style {
                size: Size {
                    width: to_taffy_dimension(style.width),
                    height: to_taffy_dimension(style.height),
                },
                padding: to_taffy_edges(style.padding),
                border: to_taffy_edges(style.border),
                ..Default::default()
            },
            &[content],
        )?;

        tree.compute_layout(
            root,
            Size {
                width: AvailableSpace::MaxContent,
                height: AvailableSpace::MaxContent,
            },
        )?;

        let layout = tree.layout(root)?;

        Ok(ContainerGeometry {
            padding: from_taffy_edges(layout.padding),
            border: from_taffy_edges(layout.border),
            bounding_box: Rect::new(
                self.origin.0 + layout.location.x,
                self.origin.1 + layout.location.y,
                layout.size.width,
                layout.size.height,
            ),
        })
    }
}

impl ContainerElement for TaffyContainer {
    fn geometry(&self) -> Result<ContainerGeometry, CaretError> {
        self.compute()
    }

    fn set_class(&mut self, class: &str) {
        self.class = class.to_string();
    }

    fn set_style(&mut self, style: &str) {
        self.style = style.to_string();
    }
}
