pub mod converter;
pub mod preview;
pub mod worksheet;

pub use converter::{
    default_output_path, ConvertReport, ConvertRequest, Converter, Overrides,
    DEFAULT_PREVIEW_SCALE, LANG_DIR_ENV,
};
pub use preview::{encode_preview, write_preview, MAX_PREVIEW_PIXELS};
pub use worksheet::{sanitize_sheet_name, LegendLayout, WorksheetWriter};
