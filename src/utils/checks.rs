use naga::front::wgsl;
use naga::valid::{Capabilities, ModuleInfo, ValidationError, ValidationFlags, Validator};
use naga::WithSpan;
use snafu::{ResultExt, Snafu};

#[derive(Debug, Snafu)]
#[snafu(context(suffix(Err)))]
pub enum ShaderValidError {
    #[snafu(display("Shader failed to parse: {source}"))]
    Parse { source: wgsl::ParseError },

    #[snafu(display("Shader failed validation: {source}"))]
    Validation { source: WithSpan<ValidationError> },
}

/// Parses and validates WGSL without touching a GPU.
pub fn validate_wgsl_source(shader: &str) -> Result<ModuleInfo, ShaderValidError> {
    let module = wgsl::parse_str(shader).context(ParseErr)?;
    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    validator.validate(&module).context(ValidationErr)
}

/// Asserts at compile time that a GPU uniform struct has the exact size the
/// shader expects and that every listed field starts on an alignment boundary.
#[macro_export]
macro_rules! ensure_aligned {
    ($ty:ident { $($field:ident),* $(,)? }, align <= $align:literal * $count:literal => size) => {
        ::static_assertions::const_assert_eq!(::std::mem::size_of::<$ty>(), $align * $count);
        $(::static_assertions::const_assert_eq!(::std::mem::offset_of!($ty, $field) % $align, 0);)*
    };
}
