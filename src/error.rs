//! The facade error, with `miette` diagnostic codes and help.

use std::fmt::Display;

use miette::Diagnostic;
use ombu_core::{DecodeError, HashError, HeaderFault, Mismatch};
use ombu_types::TypeError;
use ombu_values::{CallError, CodeError, ValueError};
use thiserror::Error;

/// Any error produced by the Ombu crates.
///
/// Each variant keeps the originating error, so callers can still match on
/// the details; the [`Diagnostic`] impl adds a stable code and, where there is
/// something actionable to say, help text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    Call(#[from] CallError),

    #[error(transparent)]
    Code(#[from] CodeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// The diagnostic code, e.g. `ombu::decode::unexpected_end`.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Decode(err) => decode_code(err),
            Error::Hash(HashError::Cyclic) => "ombu::hash::cyclic",
            Error::Type(err) => match err {
                TypeError::DuplicateShape { .. } => "ombu::types::duplicate_shape",
                TypeError::DuplicateField { .. } => "ombu::types::duplicate_field",
                TypeError::DuplicateCase { .. } => "ombu::types::duplicate_case",
                TypeError::EmptyVariant { .. } => "ombu::types::empty_variant",
                TypeError::UnboundParam { .. } => "ombu::types::unbound_param",
                TypeError::UnknownType { .. } => "ombu::types::unknown_type",
                TypeError::ArityMismatch { .. } => "ombu::types::arity_mismatch",
            },
            Error::Value(err) => value_code(err),
            Error::Call(err) => match err {
                CallError::Arity { .. } => "ombu::call::arity",
                CallError::Type { .. } => "ombu::call::type",
                CallError::Value(err) => value_code(err),
            },
            Error::Code(err) => match err {
                CodeError::DuplicateName { .. } => "ombu::code::duplicate_name",
                CodeError::TableFull => "ombu::code::table_full",
            },
        }
    }

    fn help_text(&self) -> Option<&'static str> {
        let help = match self {
            Error::Decode(err) => match err {
                DecodeError::EmptyInput | DecodeError::UnexpectedEnd { .. } => {
                    "the input is truncated; make sure the whole encoding was read"
                }
                DecodeError::BadHeader(HeaderFault::Magic) => {
                    "the input does not start with an Ombu header"
                }
                DecodeError::BadHeader(HeaderFault::Version(_)) => {
                    "the value was encoded by an incompatible version"
                }
                DecodeError::UnknownShape { .. } => {
                    "values can only be decoded by a build of the program that encoded them"
                }
                DecodeError::ShapeMismatch { detail, .. } => match detail {
                    Mismatch::FieldCount { .. }
                    | Mismatch::UnknownCase { .. }
                    | Mismatch::PayloadCount { .. }
                    | Mismatch::CaptureCount { .. } => {
                        "the declaration changed since the value was encoded"
                    }
                    _ => return None,
                },
                DecodeError::DepthExceeded { .. } => {
                    "raise `DecodeOptions::max_depth` if the input is trusted"
                }
                DecodeError::ObjectLimit { .. } => {
                    "raise `DecodeOptions::max_objects` if the input is trusted"
                }
                DecodeError::TrailingBytes { .. } => {
                    "use `unmarshal_prefix` to decode a value followed by other data"
                }
                _ => return None,
            },
            Error::Hash(HashError::Cyclic) => {
                "cyclic values can be compared with `==` but not hashed"
            }
            Error::Value(ValueError::ImmutableField { .. }) => {
                "declare the field with `RecordDecl::mutable_field`"
            }
            _ => return None,
        };
        Some(help)
    }
}

impl Diagnostic for Error {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(Error::code(self)))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.help_text()
            .map(|help| Box::new(help) as Box<dyn Display + 'a>)
    }
}

fn decode_code(err: &DecodeError) -> &'static str {
    match err {
        DecodeError::EmptyInput => "ombu::decode::empty_input",
        DecodeError::UnexpectedEnd { .. } => "ombu::decode::unexpected_end",
        DecodeError::UnrecognizedTag { .. } => "ombu::decode::unrecognized_tag",
        DecodeError::UnknownShape { .. } => "ombu::decode::unknown_shape",
        DecodeError::InvalidBackReference { .. } => "ombu::decode::invalid_back_reference",
        DecodeError::BadHeader(_) => "ombu::decode::bad_header",
        DecodeError::InvalidVarint { .. } => "ombu::decode::invalid_varint",
        DecodeError::InvalidPayload { .. } => "ombu::decode::invalid_payload",
        DecodeError::ShapeMismatch { .. } => "ombu::decode::shape_mismatch",
        DecodeError::DepthExceeded { .. } => "ombu::decode::depth_exceeded",
        DecodeError::ObjectLimit { .. } => "ombu::decode::object_limit",
        DecodeError::TrailingBytes { .. } => "ombu::decode::trailing_bytes",
    }
}

fn value_code(err: &ValueError) -> &'static str {
    match err {
        ValueError::Arity { .. } => "ombu::value::arity",
        ValueError::UnknownCase { .. } => "ombu::value::unknown_case",
        ValueError::UnknownField { .. } => "ombu::value::unknown_field",
        ValueError::ImmutableField { .. } => "ombu::value::immutable_field",
        ValueError::IndexOutOfBounds { .. } => "ombu::value::index_out_of_bounds",
        ValueError::ZeroDenominator => "ombu::value::zero_denominator",
        ValueError::CyclicSpine => "ombu::value::cyclic_spine",
    }
}
