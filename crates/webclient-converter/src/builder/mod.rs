//! Lazy, order-preserving MessagePack builders.
//!
//! A builder is an append-only list of [`Instruction`]s. Nothing is encoded
//! until [`MsgpackObjectBuilder::consume`] (or the array counterpart) turns
//! the whole tree into bytes, so a parent can be assembled before the nested
//! builders it embeds are known.
//!
//! Builders are plain values: every `put` takes `self` and hands the builder
//! back, and `consume` takes ownership. A consumed builder no longer exists,
//! so a structure can never be emitted twice:
//!
//! ```compile_fail
//! use webclient_converter::builder::MsgpackObjectBuilder;
//!
//! let builder = MsgpackObjectBuilder::new().put("id", "ECHOECHO");
//! let first = builder.consume();
//! let second = builder.consume();
//! ```
//!
//! Builders are `Send` but carry no synchronization; populate and consume
//! each one on a single thread.

mod encode;
mod instruction;

pub use instruction::{Instruction, InstructionType, Value, WireType};

/// A map builder. Every instruction is written after its key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MsgpackObjectBuilder {
    instructions: Vec<(&'static str, Instruction)>,
}

impl MsgpackObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` under `key`.
    pub fn put(mut self, key: &'static str, value: impl Into<Value>) -> Self {
        self.instructions.push((key, Instruction::new(value)));
        self
    }

    /// Appends `value` under `key` only when it is present.
    pub fn maybe_put<V: Into<Value>>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.put(key, value),
            None => self,
        }
    }

    /// Appends an explicit null of type `ty` under `key`.
    pub fn put_null(mut self, key: &'static str, ty: InstructionType) -> Self {
        self.instructions.push((key, Instruction::null(ty)));
        self
    }

    /// Appends `value`, or a typed null when it is absent. Reserved for
    /// fields that must be present even without a value.
    pub fn put_nullable<V: WireType>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.put(key, value),
            None => self.put_null(key, V::TYPE),
        }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.instructions.iter().map(|(key, _)| *key)
    }

    pub fn instructions(&self) -> impl Iterator<Item = (&'static str, &Instruction)> {
        self.instructions.iter().map(|(key, ins)| (*key, ins))
    }

    /// Encodes the builder tree and returns the bytes.
    pub fn consume(self) -> Vec<u8> {
        encode::consume(&MsgpackBuilder::Object(self))
    }
}

/// An array builder. Instructions are written in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MsgpackArrayBuilder {
    instructions: Vec<Instruction>,
}

impl MsgpackArrayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(mut self, value: impl Into<Value>) -> Self {
        self.instructions.push(Instruction::new(value));
        self
    }

    pub fn maybe_put<V: Into<Value>>(self, value: Option<V>) -> Self {
        match value {
            Some(value) => self.put(value),
            None => self,
        }
    }

    pub fn put_null(mut self, ty: InstructionType) -> Self {
        self.instructions.push(Instruction::null(ty));
        self
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }

    pub fn consume(self) -> Vec<u8> {
        encode::consume(&MsgpackBuilder::Array(self))
    }
}

impl<V: Into<Value>> FromIterator<V> for MsgpackArrayBuilder {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |builder, value| builder.put(value))
    }
}

/// Either builder shape, as nested inside a payload instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum MsgpackBuilder {
    Object(MsgpackObjectBuilder),
    Array(MsgpackArrayBuilder),
}

impl MsgpackBuilder {
    pub fn len(&self) -> usize {
        match self {
            MsgpackBuilder::Object(builder) => builder.len(),
            MsgpackBuilder::Array(builder) => builder.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn consume(self) -> Vec<u8> {
        encode::consume(&self)
    }
}

impl From<MsgpackObjectBuilder> for MsgpackBuilder {
    fn from(builder: MsgpackObjectBuilder) -> Self {
        MsgpackBuilder::Object(builder)
    }
}

impl From<MsgpackArrayBuilder> for MsgpackBuilder {
    fn from(builder: MsgpackArrayBuilder) -> Self {
        MsgpackBuilder::Array(builder)
    }
}
