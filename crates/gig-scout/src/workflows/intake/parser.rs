use crate::workflows::matching::SkipReason;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::io::Read;

/// Read a CSV export into canonical-shaped JSON objects, one slot per data row.
///
/// An unreadable header or an I/O failure aborts the whole export. A row that
/// cannot be decoded keeps its slot as a [`SkipReason`].
pub(crate) fn parse_records<R: Read>(
    reader: R,
) -> Result<Vec<Result<Value, SkipReason>>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    csv_reader.headers()?;
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<GigRow>() {
        match record {
            Ok(row) => records.push(Ok(row.into_record())),
            Err(err) if err.is_io_error() => return Err(err),
            Err(err) => records.push(Err(SkipReason::UnreadableRow {
                detail: err.to_string(),
            })),
        }
    }

    Ok(records)
}

#[derive(Debug, Default, Deserialize)]
struct GigRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    platform: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    budget_min: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    budget_max: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    hourly_rate: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    project_type: Option<String>,
    #[serde(
        default,
        alias = "skills",
        deserialize_with = "empty_string_as_none"
    )]
    skills_required: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    client_rating: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    client_reviews: Option<String>,
    #[serde(
        default,
        alias = "proposals",
        deserialize_with = "empty_string_as_none"
    )]
    proposals_count: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    posted_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    deadline: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    url: Option<String>,
}

impl GigRow {
    fn into_record(self) -> Value {
        let cells = [
            ("id", self.id),
            ("platform", self.platform),
            ("title", self.title),
            ("description", self.description),
            ("budget_min", self.budget_min),
            ("budget_max", self.budget_max),
            ("hourly_rate", self.hourly_rate),
            ("project_type", self.project_type),
            ("skills_required", self.skills_required),
            ("client_rating", self.client_rating),
            ("client_reviews", self.client_reviews),
            ("proposals_count", self.proposals_count),
            ("posted_date", self.posted_date),
            ("deadline", self.deadline),
            ("url", self.url),
        ];

        let fields: Map<String, Value> = cells
            .into_iter()
            .filter_map(|(key, cell)| cell.map(|cell| (key.to_string(), Value::String(cell))))
            .collect();
        Value::Object(fields)
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
