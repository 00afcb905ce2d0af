//! Configuration for the grout mosaic engine, parsed from KDL.
//!
//! ```kdl
//! resize-step {
//!     row 0.05
//!     col 0.1
//! }
//!
//! split-mode "create"
//! ```

#[macro_use]
extern crate tracing;

use std::path::Path;

use grout_ipc::SplitMode;
use knuffel::errors::DecodeError;
use miette::{Context, IntoDiagnostic};

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub resize_step: ResizeStep,
    #[knuffel(child, unwrap(argument, str), default)]
    pub split_mode: SplitMode,
}

/// How far one resize command moves a border, in window fractions.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct ResizeStep {
    #[knuffel(child, unwrap(argument), default = FloatOrInt(0.05))]
    pub row: FloatOrInt<0, 1>,
    #[knuffel(child, unwrap(argument), default = FloatOrInt(0.05))]
    pub col: FloatOrInt<0, 1>,
}

impl Default for ResizeStep {
    fn default() -> Self {
        Self {
            row: FloatOrInt(0.05),
            col: FloatOrInt(0.05),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let _span = tracy_client::span!("Config::load");
        Self::load_internal(path).with_context(|| format!("error loading config from {path:?}"))
    }

    fn load_internal(path: &Path) -> miette::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let config = Self::parse(
            path.file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("config.kdl"),
            &contents,
        )?;

        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        let _span = tracy_client::span!("Config::parse");
        knuffel::parse(filename, text)
    }
}

/// A scalar that accepts both integer and float literals, bounds-checked.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FloatOrInt<const FROM: i32, const TO: i32>(pub f64);

impl<S: knuffel::traits::ErrorSpan, const FROM: i32, const TO: i32> knuffel::DecodeScalar<S>
    for FloatOrInt<FROM, TO>
{
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        if let Some(type_name) = &type_name {
            ctx.emit_error(DecodeError::unexpected(
                type_name,
                "type name",
                "no type name expected for this node",
            ));
        }
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        match &**val {
            knuffel::ast::Literal::Int(ref value) => match value.try_into() {
                Ok(value) => {
                    let value: i32 = value;
                    if (FROM..=TO).contains(&value) {
                        Ok(FloatOrInt(f64::from(value)))
                    } else {
                        ctx.emit_error(DecodeError::conversion(
                            val,
                            format!("value must be between {FROM} and {TO}"),
                        ));
                        Ok(FloatOrInt::default())
                    }
                }
                Err(e) => {
                    ctx.emit_error(DecodeError::conversion(val, e));
                    Ok(FloatOrInt::default())
                }
            },
            knuffel::ast::Literal::Decimal(ref value) => match value.try_into() {
                Ok(value) => {
                    let value: f64 = value;
                    if (f64::from(FROM)..=f64::from(TO)).contains(&value) {
                        Ok(FloatOrInt(value))
                    } else {
                        ctx.emit_error(DecodeError::conversion(
                            val,
                            format!("value must be between {FROM} and {TO}"),
                        ));
                        Ok(FloatOrInt::default())
                    }
                }
                Err(e) => {
                    ctx.emit_error(DecodeError::conversion(val, e));
                    Ok(FloatOrInt::default())
                }
            },
            _ => {
                ctx.emit_error(DecodeError::unsupported(
                    val,
                    "Unsupported value, only numbers are recognized",
                ));
                Ok(FloatOrInt::default())
            }
        }
    }
}
