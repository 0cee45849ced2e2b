//! Spreadsheet output
//!
//! The workbook has two sheets of square cells, one cell per pixel:
//!
//! - Numbers sheet: thin-bordered grid with the legend number of each
//!   non-white pixel, plus the legend and instructions to the right
//! - Colors sheet: the same grid filled with the actual colors
//!
//! White pixels stay empty on both sheets.

use std::path::Path;

use grid_quant::{LegendEntry, Palette, Quantization};
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet, XlsxError,
};

use crate::error::WriteError;
use crate::models::Texts;

/// Column width that makes cells square at the default row height
pub const SQUARE_COLUMN_WIDTH: f64 = 2.857;

/// Longest sheet name a workbook accepts
pub const MAX_SHEET_NAME_CHARS: usize = 31;

/// Characters a sheet name cannot contain
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Worksheet column limit
const MAX_COLUMNS: u32 = 16_384;

/// Worksheet row limit
const MAX_ROWS: u32 = 1_048_576;

/// Columns right of the grid used by the legend caption
const LEGEND_COLUMNS: u32 = 5;

/// Cell positions of the legend, right of a grid `width` cells wide
///
/// All positions are zero-based `(row, column)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendLayout {
    width: u16,
}

impl LegendLayout {
    /// Layout for a grid `width` cells wide
    pub fn new(width: u16) -> Self {
        Self { width }
    }

    /// Column holding the legend numbers (one gap column after the grid)
    pub fn number_col(&self) -> u16 {
        self.width + 1
    }

    /// Column holding the "=" signs
    pub fn equals_col(&self) -> u16 {
        self.width + 2
    }

    /// Column holding the color names
    pub fn name_col(&self) -> u16 {
        self.width + 3
    }

    /// Row of legend entry `number` (numbers start at 1, below the caption)
    pub fn row(&self, number: u32) -> u32 {
        number + 3
    }

    /// Merged caption block: rows 0..=2, five columns from the number column
    pub fn caption_range(&self) -> (u32, u16, u32, u16) {
        let first = self.number_col();
        (0, first, 2, first + LEGEND_COLUMNS as u16 - 1)
    }

    /// Columns of the numbers sheet that get the square width
    ///
    /// Covers the grid, the gap, the number and "=" columns. The name
    /// column keeps the default width.
    pub fn square_columns(&self) -> u16 {
        self.width + 3
    }
}

/// Make `name` usable as a sheet name
///
/// Forbidden characters become `_`, surrounding apostrophes and whitespace
/// are dropped and the result is cut to 31 characters. An empty result (or
/// the reserved name "History") gives `fallback`.
pub fn sanitize_sheet_name(name: &str, fallback: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if FORBIDDEN_SHEET_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed: String = replaced
        .trim()
        .trim_matches('\'')
        .trim()
        .chars()
        .take(MAX_SHEET_NAME_CHARS)
        .collect();
    let trimmed = trimmed.trim_end().trim_end_matches('\'').to_string();

    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("history") {
        fallback.to_string()
    } else {
        trimmed
    }
}

/// Sheet names for both sheets, distinct from each other
pub fn sheet_names(texts: &Texts) -> (String, String) {
    let numbers = sanitize_sheet_name(texts.numbers_title(), "Sheet1");
    let mut colors = sanitize_sheet_name(texts.colors_title(), "Sheet2");
    if colors.to_lowercase() == numbers.to_lowercase() {
        colors = if numbers == "Sheet2" {
            "Sheet3".to_string()
        } else {
            "Sheet2".to_string()
        };
    }
    (numbers, colors)
}

/// Solid fill in the color of a legend entry
fn fill_format(entry: &LegendEntry) -> Format {
    Format::new()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(Color::RGB(entry.color.to_u32()))
}

/// Workbook writer
pub struct WorksheetWriter<'a> {
    palette: &'a Palette,
    texts: &'a Texts,
}

impl<'a> WorksheetWriter<'a> {
    pub fn new(palette: &'a Palette, texts: &'a Texts) -> Self {
        Self { palette, texts }
    }

    /// Build the workbook and save it to `path`
    ///
    /// Nothing is written unless every cell could be laid out.
    pub fn write(&self, path: &Path, result: &Quantization) -> Result<(), WriteError> {
        let to_write_error = |source| WriteError::Workbook {
            path: path.to_path_buf(),
            source,
        };

        let mut workbook = self.build(result)?;
        workbook.save(path).map_err(to_write_error)?;

        tracing::info!(
            path = %path.display(),
            width = result.image.width(),
            height = result.image.height(),
            colors = result.legend.len(),
            "Wrote workbook"
        );
        Ok(())
    }

    /// Build the workbook in memory
    pub fn build(&self, result: &Quantization) -> Result<Workbook, WriteError> {
        let (width, height) = (result.image.width(), result.image.height());
        if width + 1 + LEGEND_COLUMNS > MAX_COLUMNS
            || height > MAX_ROWS
            || result.legend.len() as u32 + 3 >= MAX_ROWS
        {
            return Err(WriteError::GridTooLarge { width, height });
        }

        let (numbers_name, colors_name) = sheet_names(self.texts);
        let numbers = self.numbers_sheet(&numbers_name, result)?;
        let colors = self.colors_sheet(&colors_name, result)?;

        let mut workbook = Workbook::new();
        workbook.push_worksheet(numbers);
        workbook.push_worksheet(colors);
        Ok(workbook)
    }

    fn numbers_sheet(&self, name: &str, result: &Quantization) -> Result<Worksheet, XlsxError> {
        let image = &result.image;
        let layout = LegendLayout::new(image.width() as u16);

        let mut sheet = Worksheet::new();
        sheet.set_name(name)?;
        sheet.set_print_fit_to_pages(1, 1);
        for col in 0..layout.square_columns() {
            sheet.set_column_width(col, SQUARE_COLUMN_WIDTH)?;
        }

        // Legend
        let centered = Format::new().set_align(FormatAlign::Center);
        for entry in result.legend.iter() {
            let row = layout.row(entry.number);
            sheet.write_number(row, layout.number_col(), entry.number)?;
            sheet.write_string_with_format(row, layout.equals_col(), "=", &centered)?;
            sheet.write_string(
                row,
                layout.name_col(),
                self.texts.color_name(self.palette, entry.palette_index),
            )?;
        }

        // Caption
        let caption = Format::new()
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::Top)
            .set_text_wrap();
        let (first_row, first_col, last_row, last_col) = layout.caption_range();
        sheet.merge_range(
            first_row,
            first_col,
            last_row,
            last_col,
            self.texts.instructions(),
            &caption,
        )?;

        // Grid
        let bordered = Format::new().set_border(FormatBorder::Thin);
        for y in 0..image.height() {
            for x in 0..image.width() {
                let col = x as u16;
                match result.legend.get(image.slot_at(x, y)) {
                    Some(entry) => {
                        sheet.write_number_with_format(y, col, entry.number, &bordered)?;
                    }
                    None => {
                        sheet.write_blank(y, col, &bordered)?;
                    }
                }
            }
        }

        Ok(sheet)
    }

    fn colors_sheet(&self, name: &str, result: &Quantization) -> Result<Worksheet, XlsxError> {
        let image = &result.image;

        let mut sheet = Worksheet::new();
        sheet.set_name(name)?;
        sheet.set_print_fit_to_pages(1, 1);
        for col in 0..image.width() as u16 {
            sheet.set_column_width(col, SQUARE_COLUMN_WIDTH)?;
        }

        // One fill format per legend entry
        let fills: Vec<Format> = result.legend.iter().map(fill_format).collect();

        for y in 0..image.height() {
            for x in 0..image.width() {
                if let Some(entry) = result.legend.get(image.slot_at(x, y)) {
                    let fill = &fills[entry.number as usize - 1];
                    sheet.write_blank(y, x as u16, fill)?;
                }
            }
        }

        Ok(sheet)
    }
}
