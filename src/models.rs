use mongodb::bson::Bson;
use serde::{de, Deserialize, Deserializer, Serialize};

/// CMS date fields hold either a stored datetime or free text. Datetimes
/// come out as RFC 3339.
fn date_or_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Bson>::deserialize(deserializer)? {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::String(s)) => Ok(Some(s)),
        Some(Bson::DateTime(dt)) => Ok(Some(
            dt.try_to_rfc3339_string().unwrap_or_else(|_| dt.to_string()),
        )),
        Some(other) => Err(de::Error::custom(format!(
            "expected a date or a string, found {:?}",
            other.element_type()
        ))),
    }
}

/// A single catalog entry, as stored in the `bookcatalog` collection or
/// synthesized from a spreadsheet row.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    // None is "unknown", not "checked out".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    // Opaque asset reference (URL or CMS media id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl BookRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// `libraryinformation` collection entry.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LibraryInformation {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "date_or_text", skip_serializing_if = "Option::is_none")]
    pub date_established: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission_statement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision_statement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
}

/// `libraryphotos` collection entry.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LibraryPhoto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_description: Option<String>,
    #[serde(default, deserialize_with = "date_or_text", skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photographer: Option<String>,
}

/// Raw `values` payload of the spreadsheet API: rows of string cells,
/// first row is the header.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct SheetValues {
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}
