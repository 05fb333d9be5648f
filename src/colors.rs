//! Global colors.

use nu_ansi_term::Color;

/// The attention color.
pub(crate) const ATTENTION_COLOR: Color = Color::Red;

/// The information color (URLs, versions).
pub(crate) const INFO_COLOR: Color = Color::Cyan;

/// The color used to colorise paths.
pub(crate) const PATH_COLOR: Color = Color::LightBlue;
