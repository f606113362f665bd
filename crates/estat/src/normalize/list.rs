//! Table and survey listing normalization.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Result;
use crate::model::{ListInf, StatsListResponse, TableInf};

use super::{continuation_hint, NormalizedResponse, Segment};

/// One table entry of the grouped listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableEntry {
    #[serde(rename = "statsDataId")]
    pub stats_data_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no: Option<String>,
    pub title: String,
}

/// Two-level grouping: governing organization, then statistics name.
pub type TableGroups = IndexMap<String, IndexMap<String, Vec<TableEntry>>>;

/// One survey under its organization grouping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyEntry {
    #[serde(rename = "statsCode")]
    pub stats_code: String,
    pub name: String,
}

/// One-level grouping keyed by governing organization.
pub type SurveyGroups = IndexMap<String, Vec<SurveyEntry>>;

/// Deduplicate and group a table listing.
///
/// Identity is the full (id, title, statistics name, organization) tuple;
/// the upstream repeats identical rows across pagination pages. First-seen
/// order is preserved at every level.
pub fn group_tables(tables: &[TableInf]) -> TableGroups {
    let mut seen = HashSet::new();
    let mut groups = TableGroups::new();
    for table in tables {
        let key = (
            table.id.as_str(),
            table.title.text.as_str(),
            table.statistics_name.as_str(),
            table.gov_org.name.as_str(),
        );
        if !seen.insert(key) {
            continue;
        }
        groups
            .entry(table.gov_org.name.clone())
            .or_default()
            .entry(table.statistics_name.clone())
            .or_default()
            .push(TableEntry {
                stats_data_id: table.id.clone(),
                no: table.title.no.clone(),
                title: table.title.text.clone(),
            });
    }
    groups
}

/// Deduplicate and group a survey listing by governing organization.
pub fn group_surveys(surveys: &[ListInf]) -> SurveyGroups {
    let mut seen = HashSet::new();
    let mut groups = SurveyGroups::new();
    for survey in surveys {
        let key = (
            survey.id.as_str(),
            survey.stat_name.name.as_str(),
            survey.gov_org.name.as_str(),
        );
        if !seen.insert(key) {
            continue;
        }
        groups
            .entry(survey.gov_org.name.clone())
            .or_default()
            .push(SurveyEntry {
                stats_code: survey.id.clone(),
                name: survey.stat_name.name.clone(),
            });
    }
    groups
}

/// Normalize a table listing response.
pub fn normalize_table_list(response: &StatsListResponse) -> Result<NormalizedResponse> {
    if response.result.status != 0 {
        return Ok(NormalizedResponse::upstream_error(&response.result.error_msg));
    }
    let Some(data_list) = &response.data_list else {
        return Ok(NormalizedResponse::no_data());
    };

    let groups = group_tables(&data_list.tables);
    if groups.is_empty() {
        return Ok(NormalizedResponse::no_data());
    }

    let mut segments = vec![
        Segment::Text(
            "List of tables, grouped by ministry and survey name \
             (statsDataId: table ID, no: table number, title: table title)"
                .to_string(),
        ),
        Segment::Json(serde_json::to_value(&groups)?),
    ];
    if let Some(hint) = continuation_hint(data_list.result_inf.next_key) {
        segments.push(hint);
    }
    Ok(NormalizedResponse::ok(segments))
}

/// Normalize a names-only survey listing response.
pub fn normalize_survey_list(response: &StatsListResponse) -> Result<NormalizedResponse> {
    if response.result.status != 0 {
        return Ok(NormalizedResponse::upstream_error(&response.result.error_msg));
    }
    let Some(data_list) = &response.data_list else {
        return Ok(NormalizedResponse::no_data());
    };

    let groups = group_surveys(&data_list.surveys);
    if groups.is_empty() {
        return Ok(NormalizedResponse::no_data());
    }

    let mut segments = vec![
        Segment::Text(
            "List of surveys, grouped by ministry (statsCode: survey code, name: survey name)"
                .to_string(),
        ),
        Segment::Json(serde_json::to_value(&groups)?),
    ];
    if let Some(hint) = continuation_hint(data_list.result_inf.next_key) {
        segments.push(hint);
    }
    Ok(NormalizedResponse::ok(segments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodedName, Title};

    fn table(id: &str, title: &str, stats_name: &str, org: &str) -> TableInf {
        TableInf {
            id: id.to_string(),
            stat_name: CodedName {
                code: "00200521".to_string(),
                name: "国勢調査".to_string(),
            },
            gov_org: CodedName {
                code: "00200".to_string(),
                name: org.to_string(),
            },
            statistics_name: stats_name.to_string(),
            title: Title {
                no: None,
                text: title.to_string(),
            },
        }
    }

    #[test]
    fn test_identical_tuples_collapse() {
        let tables = vec![
            table("001", "人口", "国勢調査", "総務省"),
            table("001", "人口", "国勢調査", "総務省"),
        ];
        let groups = group_tables(&tables);
        assert_eq!(groups["総務省"]["国勢調査"].len(), 1);
    }

    #[test]
    fn test_same_id_different_title_kept() {
        let tables = vec![
            table("001", "人口", "国勢調査", "総務省"),
            table("001", "世帯", "国勢調査", "総務省"),
        ];
        let groups = group_tables(&tables);
        assert_eq!(groups["総務省"]["国勢調査"].len(), 2);
    }

    #[test]
    fn test_grouping_preserves_first_seen_order() {
        let tables = vec![
            table("001", "a", "調査B", "厚生労働省"),
            table("002", "b", "調査A", "総務省"),
            table("003", "c", "調査C", "厚生労働省"),
        ];
        let groups = group_tables(&tables);

        let orgs: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(orgs, vec!["厚生労働省", "総務省"]);
        let surveys: Vec<&str> = groups["厚生労働省"].keys().map(String::as_str).collect();
        assert_eq!(surveys, vec!["調査B", "調査C"]);
    }

    #[test]
    fn test_survey_grouping() {
        let surveys = vec![
            ListInf {
                id: "00200521".to_string(),
                stat_name: CodedName {
                    code: "00200521".to_string(),
                    name: "国勢調査".to_string(),
                },
                gov_org: CodedName {
                    code: "00200".to_string(),
                    name: "総務省".to_string(),
                },
            },
            ListInf {
                id: "00450011".to_string(),
                stat_name: CodedName {
                    code: "00450011".to_string(),
                    name: "人口動態調査".to_string(),
                },
                gov_org: CodedName {
                    code: "00450".to_string(),
                    name: "厚生労働省".to_string(),
                },
            },
        ];
        let groups = group_surveys(&surveys);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["総務省"][0].stats_code, "00200521");
        assert_eq!(groups["厚生労働省"][0].name, "人口動態調査");
    }
}
