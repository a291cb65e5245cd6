//! Encoder adapter: the only place where builders turn into bytes.
//!
//! Nested payloads are written depth-first before the parent continues.
//! The destination is an in-memory buffer, so there is no failure path.

use webclient_msgpack::MsgPackEncoder;

use super::{Instruction, MsgpackBuilder, Value};

pub(super) fn consume(builder: &MsgpackBuilder) -> Vec<u8> {
    let mut encoder = MsgPackEncoder::new();
    write_builder(&mut encoder, builder);
    encoder.flush()
}

fn write_builder(encoder: &mut MsgPackEncoder, builder: &MsgpackBuilder) {
    match builder {
        MsgpackBuilder::Object(object) => {
            encoder.write_obj_hdr(object.len());
            for (key, instruction) in object.instructions() {
                encoder.write_str(key);
                write_instruction(encoder, instruction);
            }
        }
        MsgpackBuilder::Array(array) => {
            encoder.write_arr_hdr(array.len());
            for instruction in array.instructions() {
                write_instruction(encoder, instruction);
            }
        }
    }
}

fn write_instruction(encoder: &mut MsgPackEncoder, instruction: &Instruction) {
    let Some(value) = instruction.value() else {
        encoder.write_null();
        return;
    };
    match value {
        Value::String(s) => encoder.write_str(s),
        Value::Int32(i) => encoder.write_integer(i64::from(*i)),
        Value::Int64(i) => encoder.write_integer(*i),
        Value::Float32(f) => encoder.write_f32(*f),
        Value::Float64(f) => encoder.write_f64(*f),
        Value::Bool(b) => encoder.write_boolean(*b),
        Value::Bytes(b) => encoder.write_bin(b),
        Value::Payload(nested) => write_builder(encoder, nested),
        Value::PayloadList(list) => {
            encoder.write_arr_hdr(list.len());
            for nested in list {
                write_builder(encoder, nested);
            }
        }
    }
}
