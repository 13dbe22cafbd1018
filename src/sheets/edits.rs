use google_sheets4::FieldMask;
use google_sheets4::api::{
    AddSheetRequest, CopyPasteRequest, GridRange, Request, SheetProperties,
    SpreadsheetProperties, UpdateSpreadsheetPropertiesRequest,
};

/// Zero-based, half-open rectangle of cells within one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRect {
    pub sheet_id: i32,
    pub start_row: i32,
    pub end_row: i32,
    pub start_column: i32,
    pub end_column: i32,
}

impl From<GridRect> for GridRange {
    fn from(rect: GridRect) -> Self {
        GridRange {
            sheet_id: Some(rect.sheet_id),
            start_row_index: Some(rect.start_row),
            end_row_index: Some(rect.end_row),
            start_column_index: Some(rect.start_column),
            end_column_index: Some(rect.end_column),
        }
    }
}

// https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets/request#pastetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasteType {
    #[default]
    Normal,
    Values,
    Format,
    NoBorders,
    Formula,
    DataValidation,
    ConditionalFormatting,
}

impl PasteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PasteType::Normal => "PASTE_NORMAL",
            PasteType::Values => "PASTE_VALUES",
            PasteType::Format => "PASTE_FORMAT",
            PasteType::NoBorders => "PASTE_NO_BORDERS",
            PasteType::Formula => "PASTE_FORMULA",
            PasteType::DataValidation => "PASTE_DATA_VALIDATION",
            PasteType::ConditionalFormatting => "PASTE_CONDITIONAL_FORMATTING",
        }
    }
}

/// Structural change applied through a spreadsheet batch update.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuralEdit {
    AddSheet {
        title: String,
        /// Left to the service when unset
        sheet_id: Option<i32>,
    },
    CopyPaste {
        source: GridRect,
        destination: GridRect,
        paste_type: PasteType,
    },
    RenameSpreadsheet {
        title: String,
    },
}

impl From<&StructuralEdit> for Request {
    fn from(edit: &StructuralEdit) -> Self {
        match edit {
            StructuralEdit::AddSheet { title, sheet_id } => Request {
                add_sheet: Some(AddSheetRequest {
                    properties: Some(SheetProperties {
                        title: Some(title.clone()),
                        sheet_id: *sheet_id,
                        sheet_type: Some("GRID".to_string()),
                        ..Default::default()
                    }),
                }),
                ..Default::default()
            },
            StructuralEdit::CopyPaste {
                source,
                destination,
                paste_type,
            } => Request {
                copy_paste: Some(CopyPasteRequest {
                    source: Some((*source).into()),
                    destination: Some((*destination).into()),
                    paste_type: Some(paste_type.as_str().to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            StructuralEdit::RenameSpreadsheet { title } => Request {
                update_spreadsheet_properties: Some(UpdateSpreadsheetPropertiesRequest {
                    properties: Some(SpreadsheetProperties {
                        title: Some(title.clone()),
                        ..Default::default()
                    }),
                    // Only touch the title; "*" would reset every other property
                    fields: Some(FieldMask::new(&["title"])),
                }),
                ..Default::default()
            },
        }
    }
}

pub(super) fn to_requests(edits: &[StructuralEdit]) -> Vec<Request> {
    edits.iter().map(Request::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_rect(sheet_id: i32) -> GridRect {
        GridRect {
            sheet_id,
            start_row: 0,
            end_row: 1,
            start_column: 0,
            end_column: 2,
        }
    }

    #[test]
    fn test_add_sheet_request() {
        let request = Request::from(&StructuralEdit::AddSheet {
            title: "AutomaticSheet1".to_string(),
            sheet_id: Some(1),
        });

        let properties = request.add_sheet.and_then(|r| r.properties).unwrap();
        assert_eq!(properties.title.as_deref(), Some("AutomaticSheet1"));
        assert_eq!(properties.sheet_id, Some(1));
        assert!(request.copy_paste.is_none());
    }

    #[test]
    fn test_copy_paste_request() {
        let request = Request::from(&StructuralEdit::CopyPaste {
            source: header_rect(0),
            destination: header_rect(1),
            paste_type: PasteType::Values,
        });

        let copy_paste = request.copy_paste.unwrap();
        assert_eq!(copy_paste.paste_type.as_deref(), Some("PASTE_VALUES"));

        let source = copy_paste.source.unwrap();
        assert_eq!(source.sheet_id, Some(0));
        assert_eq!(source.end_column_index, Some(2));
        assert_eq!(source.end_row_index, Some(1));

        let destination = copy_paste.destination.unwrap();
        assert_eq!(destination.sheet_id, Some(1));
        assert_eq!(destination.start_row_index, Some(0));
    }

    #[test]
    fn test_edits_keep_order() {
        let edits = vec![
            StructuralEdit::AddSheet {
                title: "AutomaticSheet1".to_string(),
                sheet_id: None,
            },
            StructuralEdit::CopyPaste {
                source: header_rect(0),
                destination: header_rect(1),
                paste_type: PasteType::default(),
            },
            StructuralEdit::RenameSpreadsheet {
                title: "Expenses - API".to_string(),
            },
        ];

        let requests = to_requests(&edits);

        assert_eq!(requests.len(), 3);
        assert!(requests[0].add_sheet.is_some());
        assert!(requests[1].copy_paste.is_some());
        let rename = requests[2]
            .update_spreadsheet_properties
            .as_ref()
            .and_then(|r| r.properties.as_ref())
            .and_then(|p| p.title.as_deref());
        assert_eq!(rename, Some("Expenses - API"));
    }
}
