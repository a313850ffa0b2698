use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ContextError;

/// Margins of the page in millimeters.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Margins {
            top: 10.0,
            right: 10.0,
            bottom: 15.0,
            left: 10.0,
        }
    }
}

/// Everything that determines the look of the composed résumé. Lengths are in millimeters, font
/// sizes in points and colors are grey levels from 0 (black) to 255 (white).
///
/// Every field is optional in the JSON representation, the missing ones take their default value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfiguration {
    pub page_width: f32,
    pub page_height: f32,
    pub margins: Margins,
    /// Horizontal padding between the border of a cell and its text.
    pub cell_padding: f32,
    /// Where the horizontal rules start and end.
    pub rule_start: f32,
    pub rule_end: f32,
    pub line_width: f32,
    pub name_font_size: f32,
    pub contact_font_size: f32,
    pub section_title_font_size: f32,
    pub body_font_size: f32,
    pub contact_grey: u8,
    pub header_rule_grey: u8,
    pub section_rule_grey: u8,
    /// Written to the `ID` of the trailer and to the document information.
    pub document_identifier: String,
    pub instance_identifier: String,
    pub title: String,
}

impl Default for LayoutConfiguration {
    fn default() -> Self {
        LayoutConfiguration {
            page_width: 210.0,
            page_height: 297.0,
            margins: Margins::default(),
            cell_padding: 1.0,
            rule_start: 20.0,
            rule_end: 190.0,
            line_width: 0.2,
            name_font_size: 28.0,
            contact_font_size: 10.0,
            section_title_font_size: 12.0,
            body_font_size: 10.0,
            contact_grey: 100,
            header_rule_grey: 200,
            section_rule_grey: 100,
            document_identifier: "resumr-resume-document-000000000".into(),
            instance_identifier: "resumr-resume-instance-000000000".into(),
            title: "Resume".into(),
        }
    }
}

impl LayoutConfiguration {
    /// Loads the configuration from a JSON file.
    pub fn from_path(layout_configuration_file_path: &Path) -> Result<Self, ContextError> {
        let configuration_file_contents = std::fs::read_to_string(layout_configuration_file_path)
            .map_err(|error| {
                ContextError::with_error(
                    format!(
                        "Failed to read the layout configuration file {:?}",
                        layout_configuration_file_path
                    ),
                    &error,
                )
            })?;
        let configuration: LayoutConfiguration =
            serde_json::from_str(&configuration_file_contents).map_err(|error| {
                ContextError::with_error(
                    format!(
                        "Failed to parse the layout configuration file {:?}",
                        layout_configuration_file_path
                    ),
                    &error,
                )
            })?;

        configuration.validate()?;
        Ok(configuration)
    }

    /// Rejects the configurations where no cell could ever fit on a page.
    pub fn validate(&self) -> Result<(), ContextError> {
        if self.margins.left + self.margins.right >= self.page_width {
            return Err(ContextError::with_context(format!(
                "The horizontal margins ({} + {}) leave no room on a page {} millimeters wide",
                self.margins.left, self.margins.right, self.page_width
            )));
        }
        if self.margins.top + self.margins.bottom >= self.page_height {
            return Err(ContextError::with_context(format!(
                "The vertical margins ({} + {}) leave no room on a page {} millimeters high",
                self.margins.top, self.margins.bottom, self.page_height
            )));
        }

        Ok(())
    }
}
