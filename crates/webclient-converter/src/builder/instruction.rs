//! Queued builder state: one typed value per instruction.

use super::{MsgpackArrayBuilder, MsgpackBuilder, MsgpackObjectBuilder};

/// Wire type tag of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionType {
    String,
    Int32,
    Int64,
    Float32,
    Float64,
    Bool,
    Bytes,
    /// A nested builder.
    Payload,
    /// A list of nested builders, encoded as an array.
    PayloadList,
}

/// Instruction payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    Payload(Box<MsgpackBuilder>),
    PayloadList(Vec<MsgpackBuilder>),
}

impl Value {
    pub fn instruction_type(&self) -> InstructionType {
        match self {
            Value::String(_) => InstructionType::String,
            Value::Int32(_) => InstructionType::Int32,
            Value::Int64(_) => InstructionType::Int64,
            Value::Float32(_) => InstructionType::Float32,
            Value::Float64(_) => InstructionType::Float64,
            Value::Bool(_) => InstructionType::Bool,
            Value::Bytes(_) => InstructionType::Bytes,
            Value::Payload(_) => InstructionType::Payload,
            Value::PayloadList(_) => InstructionType::PayloadList,
        }
    }
}

/// A (type, optional value) pair. `None` encodes as wire null.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    ty: InstructionType,
    value: Option<Value>,
}

impl Instruction {
    pub fn new(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self {
            ty: value.instruction_type(),
            value: Some(value),
        }
    }

    pub fn null(ty: InstructionType) -> Self {
        Self { ty, value: None }
    }

    pub fn instruction_type(&self) -> InstructionType {
        self.ty
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

/// Rust types with a fixed instruction type, usable where a typed null may
/// be written instead of a value.
pub trait WireType: Into<Value> {
    const TYPE: InstructionType;
}

macro_rules! wire_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value.into())
                }
            }

            impl WireType for $ty {
                const TYPE: InstructionType = InstructionType::$variant;
            }
        )*
    };
}

wire_type! {
    String => String,
    &str => String,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    bool => Bool,
    Vec<u8> => Bytes,
    &[u8] => Bytes,
}

impl From<MsgpackBuilder> for Value {
    fn from(builder: MsgpackBuilder) -> Self {
        Value::Payload(Box::new(builder))
    }
}

impl From<MsgpackObjectBuilder> for Value {
    fn from(builder: MsgpackObjectBuilder) -> Self {
        MsgpackBuilder::Object(builder).into()
    }
}

impl From<MsgpackArrayBuilder> for Value {
    fn from(builder: MsgpackArrayBuilder) -> Self {
        MsgpackBuilder::Array(builder).into()
    }
}

impl From<Vec<MsgpackBuilder>> for Value {
    fn from(builders: Vec<MsgpackBuilder>) -> Self {
        Value::PayloadList(builders)
    }
}

impl From<Vec<MsgpackObjectBuilder>> for Value {
    fn from(builders: Vec<MsgpackObjectBuilder>) -> Self {
        Value::PayloadList(builders.into_iter().map(MsgpackBuilder::Object).collect())
    }
}

impl WireType for MsgpackObjectBuilder {
    const TYPE: InstructionType = InstructionType::Payload;
}

impl WireType for MsgpackArrayBuilder {
    const TYPE: InstructionType = InstructionType::Payload;
}
