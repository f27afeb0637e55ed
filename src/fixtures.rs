//! Toy widget types and hand-written bindings used by the test suite.
//!
//! These stand in for what the metadata-driven front end would emit per bound
//! type: a member table, a factory, a constructor fn returning the bare
//! description and `with_<member>` setter fns over it.
use crate::{
    attribute::{AttributeBag, Value},
    description::{Create, Description, TargetType},
    error::ApplyError,
    member::{erased, hash_f64, same_f64, Member},
    target::{expect_scalar, ChildSlot, Target},
};
use std::any::Any;

pub const DEFAULT_SIZE: f64 = 12.0;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Targets

/// A text leaf widget.
pub struct Label {
    pub text: String,
    pub size: f64,
    /// Number of scalar writes this instance received. Not a bound member;
    /// tests use it to observe the no-op branches.
    pub writes: usize,
}

// constructor defaults match the declared member defaults, as generated
// bindings guarantee
impl Default for Label {
    fn default() -> Self {
        Label {
            text: String::new(),
            size: DEFAULT_SIZE,
            writes: 0,
        }
    }
}

impl Target for Label {
    fn type_name(&self) -> &'static str {
        "Label"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn set_scalar(&mut self, member: &'static str, value: &dyn Any) -> Result<(), ApplyError> {
        self.writes += 1;
        match member {
            "text" => self.text = expect_scalar(value)?,
            "size" => self.size = expect_scalar(value)?,
            _ => {
                return Err(ApplyError::MissingMember {
                    target: self.type_name(),
                    member,
                })
            }
        }
        Ok(())
    }
}

/// A clickable text widget; answers for its base's members too.
pub struct Button {
    pub text: String,
    pub size: f64,
    pub enabled: bool,
}

impl Default for Button {
    fn default() -> Self {
        Button {
            text: String::new(),
            size: DEFAULT_SIZE,
            enabled: true,
        }
    }
}

impl Target for Button {
    fn type_name(&self) -> &'static str {
        "Button"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn set_scalar(&mut self, member: &'static str, value: &dyn Any) -> Result<(), ApplyError> {
        match member {
            "text" => self.text = expect_scalar(value)?,
            "size" => self.size = expect_scalar(value)?,
            "enabled" => self.enabled = expect_scalar(value)?,
            _ => {
                return Err(ApplyError::MissingMember {
                    target: self.type_name(),
                    member,
                })
            }
        }
        Ok(())
    }
}

/// A container with one nested-object slot and an ordered child collection.
#[derive(Default)]
pub struct Stack {
    pub spacing: f64,
    pub header: ChildSlot,
    pub children: Vec<Box<dyn Target>>,
}

impl Target for Stack {
    fn type_name(&self) -> &'static str {
        "Stack"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn set_scalar(&mut self, member: &'static str, value: &dyn Any) -> Result<(), ApplyError> {
        match member {
            "spacing" => self.spacing = expect_scalar(value)?,
            _ => {
                return Err(ApplyError::MissingMember {
                    target: self.type_name(),
                    member,
                })
            }
        }
        Ok(())
    }

    fn child_mut(&mut self, member: &'static str) -> Result<&mut ChildSlot, ApplyError> {
        match member {
            "header" => Ok(&mut self.header),
            _ => Err(ApplyError::MissingMember {
                target: self.type_name(),
                member,
            }),
        }
    }

    fn children_mut(&mut self, member: &'static str) -> Result<&mut Vec<Box<dyn Target>>, ApplyError> {
        match member {
            "children" => Ok(&mut self.children),
            _ => Err(ApplyError::MissingMember {
                target: self.type_name(),
                member,
            }),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Bindings

/// Abstract base of `Label` and `Button`; declares the shared members and is
/// not materializable itself.
pub struct TextBase;

fn default_text() -> Value {
    erased(String::new())
}

fn default_size() -> Value {
    erased(DEFAULT_SIZE)
}

fn default_enabled() -> Value {
    erased(true)
}

fn default_spacing() -> Value {
    erased(0.0f64)
}

static TEXT_BASE_MEMBERS: &[Member] = &[
    Member::scalar::<String>("text", default_text),
    Member::scalar_with("size", default_size, same_f64, hash_f64),
];

static BUTTON_MEMBERS: &[Member] = &[Member::scalar::<bool>("enabled", default_enabled)];

static STACK_MEMBERS: &[Member] = &[
    Member::scalar_with("spacing", default_spacing, same_f64, hash_f64),
    Member::child("header"),
    Member::child_list("children"),
];

static NO_MEMBERS: &[Member] = &[];

fn create_label() -> Box<dyn Target> {
    Box::new(Label::default())
}

fn create_button() -> Box<dyn Target> {
    Box::new(Button::default())
}

fn create_stack() -> Box<dyn Target> {
    Box::new(Stack::default())
}

/// Description of the abstract text base. Creating from it fails.
pub fn text_base() -> Description {
    Description::new(
        TargetType::of::<TextBase>(),
        Create::Unsupported,
        TEXT_BASE_MEMBERS,
        AttributeBag::new(),
    )
}

pub fn label() -> Description {
    text_base().inherit(
        TargetType::of::<Label>(),
        Create::New(create_label),
        NO_MEMBERS,
        AttributeBag::new(),
    )
}

pub fn button() -> Description {
    text_base().inherit(
        TargetType::of::<Button>(),
        Create::New(create_button),
        BUTTON_MEMBERS,
        AttributeBag::new(),
    )
}

pub fn stack() -> Description {
    Description::new(
        TargetType::of::<Stack>(),
        Create::New(create_stack),
        STACK_MEMBERS,
        AttributeBag::new(),
    )
}

// setter fns in the shape generated `with_<member>` accessors take

pub fn with_text(desc: &Description, text: impl Into<String>) -> Description {
    desc.with_attribute("text", text.into())
}

pub fn with_size(desc: &Description, size: f64) -> Description {
    desc.with_attribute("size", size)
}

pub fn with_enabled(desc: &Description, enabled: bool) -> Description {
    desc.with_attribute("enabled", enabled)
}

pub fn with_spacing(desc: &Description, spacing: f64) -> Description {
    desc.with_attribute("spacing", spacing)
}

pub fn with_header(desc: &Description, header: Description) -> Description {
    desc.with_attribute("header", header)
}

pub fn with_children(desc: &Description, children: Vec<Description>) -> Description {
    desc.with_attribute("children", children)
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Renders the observable state of a fixture target tree, recursively.
/// Bookkeeping fields like `Label::writes` are excluded.
pub fn snapshot(target: &dyn Target) -> String {
    if let Some(label) = target.as_any().downcast_ref::<Label>() {
        format!("Label(text={:?}, size={})", label.text, label.size)
    } else if let Some(button) = target.as_any().downcast_ref::<Button>() {
        format!(
            "Button(text={:?}, size={}, enabled={})",
            button.text, button.size, button.enabled
        )
    } else if let Some(stack) = target.as_any().downcast_ref::<Stack>() {
        let header = match &stack.header {
            Some(header) => snapshot(&**header),
            None => String::from("-"),
        };
        let children = stack
            .children
            .iter()
            .map(|c| snapshot(&**c))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Stack(spacing={}, header={}, children=[{}])",
            stack.spacing, header, children
        )
    } else {
        String::from("<unknown target>")
    }
}
