use alloc::vec::Vec;
use core::fmt;

use crate::shape::ObjectId;
use crate::value::Value;

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer { active: Vec::new() }.value(f, *self)
    }
}

/// Tracks the objects being printed, so back-edges print as `<cycle>`.
struct Printer {
    active: Vec<ObjectId>,
}

impl Printer {
    fn value(&mut self, f: &mut fmt::Formatter<'_>, value: Value<'_>) -> fmt::Result {
        let id = value.identity();
        if let Some(id) = id
            && self.active.contains(&id)
        {
            return f.write_str("<cycle>");
        }
        if let Some(id) = id {
            self.active.push(id);
        }
        let result = self.node(f, value);
        if id.is_some() {
            self.active.pop();
        }
        result
    }

    fn node(&mut self, f: &mut fmt::Formatter<'_>, value: Value<'_>) -> fmt::Result {
        match value {
            Value::Unit => f.write_str("()"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::I8(n) => write!(f, "{n}i8"),
            Value::I16(n) => write!(f, "{n}i16"),
            Value::I32(n) => write!(f, "{n}i32"),
            Value::I64(n) => write!(f, "{n}i64"),
            Value::U8(n) => write!(f, "{n}u8"),
            Value::U16(n) => write!(f, "{n}u16"),
            Value::U32(n) => write!(f, "{n}u32"),
            Value::U64(n) => write!(f, "{n}u64"),
            Value::Number(number) => write!(f, "{number:?}"),
            Value::Char(c) => write!(f, "{c:?}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            Value::Tuple(_) => self.seq(f, "(", value, ")"),
            Value::Array(_) => self.seq(f, "[", value, "]"),
            Value::List(None) => f.write_str("[]"),
            Value::List(Some(cell)) => {
                f.write_str("[")?;
                for (i, item) in cell.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" :: ")?;
                    }
                    self.value(f, item)?;
                }
                f.write_str(" :: []]")
            }
            Value::Record(record) => {
                write!(f, "{} {{", record.shape().name())?;
                for (i, (field, item)) in record.shape().fields().iter().zip(record.iter()).enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, " {}: ", field.name)?;
                    self.value(f, item)?;
                }
                f.write_str(" }")
            }
            Value::Variant(variant) => {
                match variant.case_name() {
                    Some(name) => write!(f, "{name}")?,
                    None => write!(f, "#{}", variant.case())?,
                }
                if variant.is_empty() {
                    return Ok(());
                }
                self.seq(f, "(", value, ")")
            }
            Value::Closure(closure) => {
                write!(f, "<fn {}>", closure.entry().name())?;
                if closure.entry().captures() == 0 {
                    return Ok(());
                }
                self.seq(f, "[", value, "]")
            }
        }
    }

    fn seq(
        &mut self,
        f: &mut fmt::Formatter<'_>,
        open: &str,
        value: Value<'_>,
        close: &str,
    ) -> fmt::Result {
        f.write_str(open)?;
        for (i, child) in value.children().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            self.value(f, child)?;
        }
        f.write_str(close)
    }
}
