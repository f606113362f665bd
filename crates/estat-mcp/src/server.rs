//! MCP tool surface over the estat pipeline.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo,
};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;

use estat::{EstatClient, EstatConfig, EstatError, NormalizedResponse, Segment};

static YEAR_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{4}$").unwrap());

/// Expand a plain `yyyy-yyyy` range to the `yyyyMM-yyyyMM` form the
/// upstream API expects. Anything else passes through unchanged.
fn expand_year_range(value: &str) -> String {
    if YEAR_RANGE.is_match(value) {
        value.replace('-', "01-") + "12"
    } else {
        value.to_string()
    }
}

fn push_param(params: &mut Vec<(String, String)>, key: &str, value: Option<String>) {
    if let Some(value) = value {
        params.push((key.to_string(), value));
    }
}

fn internal_error(err: EstatError) -> McpError {
    McpError::internal_error(err.to_string(), None)
}

/// Render pipeline segments as MCP content: text verbatim, JSON payloads
/// pretty-printed.
fn render(rendered: NormalizedResponse) -> CallToolResult {
    let content: Vec<Content> = rendered
        .segments
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) => Content::text(text),
            Segment::Json(value) => Content::text(
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
            ),
        })
        .collect();

    if rendered.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

/// Filters for the table listing tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableListArgs {
    /// The period referenced by the survey: yyyy, yyyymm or yyyymm-yyyymm.
    /// A plain yyyy-yyyy range is expanded to yyyy01-yyyy12.
    pub survey_years: String,
    /// Language of the response (J or E).
    pub lang: Option<String>,
    /// When the statistics were disseminated: yyyy, yyyymm or yyyymm-yyyymm.
    pub open_years: Option<String>,
    /// 2 or 4 digit code for the statistics classification.
    pub stats_field: Option<String>,
    /// 5 digit ministry code or 8 digit survey code.
    pub stats_code: Option<String>,
    /// Search words; connect multiple words with AND or OR.
    pub search_word: Option<String>,
    /// 1: general statistics, 2: small area or mesh statistics.
    pub search_kind: Option<u32>,
    /// 1: all Japan, 2: by prefecture, 3: by municipality.
    pub collect_area: Option<String>,
    /// Skip this many rows of the response.
    pub start_position: Option<u32>,
    /// Maximum number of rows in the response.
    pub limit: Option<u32>,
    /// When the results were updated: yyyy, yyyymm or yyyymm-yyyymm.
    pub updated_date: Option<String>,
}

impl TableListArgs {
    fn into_params(self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_param(
            &mut params,
            "surveyYears",
            Some(expand_year_range(&self.survey_years)),
        );
        push_param(&mut params, "lang", self.lang);
        push_param(&mut params, "openYears", self.open_years);
        push_param(&mut params, "statsField", self.stats_field);
        push_param(&mut params, "statsCode", self.stats_code);
        push_param(&mut params, "searchWord", self.search_word);
        push_param(
            &mut params,
            "searchKind",
            self.search_kind.map(|v| v.to_string()),
        );
        push_param(&mut params, "collectArea", self.collect_area);
        push_param(
            &mut params,
            "startPosition",
            self.start_position.map(|v| v.to_string()),
        );
        push_param(&mut params, "limit", self.limit.map(|v| v.to_string()));
        push_param(&mut params, "updatedDate", self.updated_date);
        params
    }
}

/// Filters for the survey listing tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyListArgs {
    /// Language of the response (J or E).
    pub lang: Option<String>,
    /// The period referenced by the survey: yyyy, yyyymm or yyyymm-yyyymm.
    pub survey_years: Option<String>,
    /// 2 or 4 digit code for the statistics classification.
    pub stats_field: Option<String>,
    /// 5 digit ministry code or 8 digit survey code.
    pub stats_code: Option<String>,
    /// Search words; connect multiple words with AND or OR.
    pub search_word: Option<String>,
    /// Skip this many rows of the response.
    pub start_position: Option<u32>,
    /// Maximum number of rows in the response.
    pub limit: Option<u32>,
}

impl SurveyListArgs {
    fn into_params(self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_param(&mut params, "lang", self.lang);
        push_param(
            &mut params,
            "surveyYears",
            self.survey_years.map(|v| expand_year_range(&v)),
        );
        push_param(&mut params, "statsField", self.stats_field);
        push_param(&mut params, "statsCode", self.stats_code);
        push_param(&mut params, "searchWord", self.search_word);
        push_param(
            &mut params,
            "startPosition",
            self.start_position.map(|v| v.to_string()),
        );
        push_param(&mut params, "limit", self.limit.map(|v| v.to_string()));
        // Names-only mode; this is what makes the listing a survey listing.
        params.push(("statsNameList".to_string(), "Y".to_string()));
        params
    }
}

/// Arguments for the metadata tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetadataArgs {
    /// Table ID. Use `get_tables` to find one.
    pub stats_data_id: String,
    /// Language of the response (J or E).
    pub lang: Option<String>,
}

/// Arguments for the data tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataArgs {
    /// Table ID. Use `get_tables` to find one.
    pub stats_data_id: String,
    /// Language of the response (J or E).
    pub lang: Option<String>,
    /// Filter by tab code.
    pub cd_tab: Option<String>,
    /// Filter by time code.
    pub cd_time: Option<String>,
    /// Filter by area code.
    pub cd_area: Option<String>,
    /// Skip this many rows of the response.
    pub start_position: Option<u32>,
    /// Maximum number of rows in the response.
    pub limit: Option<u32>,
    /// Fetch descriptions for metadata codes (Y or N).
    pub meta_get_flg: Option<String>,
    /// Fetch descriptions for non-numeric values (Y or N).
    pub annotation_get_flg: Option<String>,
}

impl DataArgs {
    fn into_params(self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_param(&mut params, "statsDataId", Some(self.stats_data_id));
        push_param(&mut params, "lang", self.lang);
        push_param(&mut params, "cdTab", self.cd_tab);
        push_param(&mut params, "cdTime", self.cd_time);
        push_param(&mut params, "cdArea", self.cd_area);
        push_param(
            &mut params,
            "startPosition",
            self.start_position.map(|v| v.to_string()),
        );
        push_param(&mut params, "limit", self.limit.map(|v| v.to_string()));
        push_param(&mut params, "metaGetFlg", self.meta_get_flg);
        push_param(&mut params, "annotationGetFlg", self.annotation_get_flg);
        params
    }
}

/// MCP server exposing the e-Stat statistics catalog as tools.
#[derive(Clone)]
pub struct EstatServer {
    client: Arc<EstatClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl EstatServer {
    /// Create a server backed by a client with the given configuration.
    pub fn new(config: EstatConfig) -> estat::Result<Self> {
        Ok(Self {
            client: Arc::new(EstatClient::new(config)?),
            tool_router: Self::tool_router(),
        })
    }

    /// Missing-identifier guard shared by the per-table tools.
    fn require_stats_data_id(id: &str) -> Option<CallToolResult> {
        if id.trim().is_empty() {
            return Some(CallToolResult::error(vec![Content::text(
                EstatError::MissingParameter("statsDataId").to_string(),
            )]));
        }
        None
    }

    #[tool(
        name = "get_tables",
        description = "Get the list of statistical tables, grouped by ministry and survey name."
    )]
    async fn get_tables(
        &self,
        Parameters(args): Parameters<TableListArgs>,
    ) -> Result<CallToolResult, McpError> {
        let response = self
            .client
            .get_stats_list(&args.into_params())
            .await
            .map_err(internal_error)?;
        let rendered = estat::normalize_table_list(&response).map_err(internal_error)?;
        Ok(render(rendered))
    }

    #[tool(
        name = "get_surveys",
        description = "Get the list of statistical surveys, grouped by ministry."
    )]
    async fn get_surveys(
        &self,
        Parameters(args): Parameters<SurveyListArgs>,
    ) -> Result<CallToolResult, McpError> {
        let response = self
            .client
            .get_stats_list(&args.into_params())
            .await
            .map_err(internal_error)?;
        let rendered = estat::normalize_survey_list(&response).map_err(internal_error)?;
        Ok(render(rendered))
    }

    #[tool(
        name = "get_metadata",
        description = "Get the classification metadata (axes and their codes) of a table \
                       specified by table ID. If you don't know the ID, use `get_tables` \
                       beforehand."
    )]
    async fn get_metadata(
        &self,
        Parameters(args): Parameters<MetadataArgs>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(rejection) = Self::require_stats_data_id(&args.stats_data_id) {
            return Ok(rejection);
        }
        let mut params = Vec::new();
        push_param(&mut params, "statsDataId", Some(args.stats_data_id));
        push_param(&mut params, "lang", args.lang);

        let response = self
            .client
            .get_meta_info(&params)
            .await
            .map_err(internal_error)?;
        let rendered = estat::normalize_metadata(&response).map_err(internal_error)?;
        Ok(render(rendered))
    }

    #[tool(
        name = "get_data",
        description = "Get data of a table specified by table ID, as a nested tree keyed by \
                       resolved classification names. If you don't know the ID, use \
                       `get_tables` beforehand."
    )]
    async fn get_data(
        &self,
        Parameters(args): Parameters<DataArgs>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(rejection) = Self::require_stats_data_id(&args.stats_data_id) {
            return Ok(rejection);
        }
        let response = self
            .client
            .get_stats_data(&args.into_params())
            .await
            .map_err(internal_error)?;
        let rendered = estat::normalize_data(&response).map_err(internal_error)?;
        Ok(render(rendered))
    }
}

#[tool_handler]
impl ServerHandler for EstatServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "e-StatJP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Query the Japanese government statistics portal (e-Stat): list tables \
                 and surveys, inspect classification metadata, and fetch table values."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_year_range() {
        assert_eq!(expand_year_range("2020-2022"), "202001-202212");
        assert_eq!(expand_year_range("2020"), "2020");
        assert_eq!(expand_year_range("202001-202012"), "202001-202012");
        assert_eq!(expand_year_range("2020-2022-2024"), "2020-2022-2024");
    }

    #[test]
    fn test_table_args_ordering_and_reformat() {
        let args = TableListArgs {
            survey_years: "2020-2021".to_string(),
            lang: None,
            open_years: None,
            stats_field: None,
            stats_code: Some("00200521".to_string()),
            search_word: None,
            search_kind: Some(1),
            collect_area: None,
            start_position: None,
            limit: Some(100),
            updated_date: None,
        };
        let params = args.into_params();
        assert_eq!(
            params,
            vec![
                ("surveyYears".to_string(), "202001-202112".to_string()),
                ("statsCode".to_string(), "00200521".to_string()),
                ("searchKind".to_string(), "1".to_string()),
                ("limit".to_string(), "100".to_string()),
            ]
        );
    }

    #[test]
    fn test_survey_args_force_names_only_mode() {
        let args = SurveyListArgs {
            lang: None,
            survey_years: None,
            stats_field: None,
            stats_code: None,
            search_word: None,
            start_position: None,
            limit: None,
        };
        let params = args.into_params();
        assert_eq!(
            params,
            vec![("statsNameList".to_string(), "Y".to_string())]
        );
    }

    #[test]
    fn test_blank_stats_data_id_is_rejected() {
        let rejection = EstatServer::require_stats_data_id("  ").expect("should reject");
        assert_eq!(rejection.is_error, Some(true));
    }

    #[test]
    fn test_render_marks_upstream_errors() {
        let rendered = NormalizedResponse {
            is_error: true,
            segments: vec![Segment::Text("boom".to_string())],
        };
        let result = render(rendered);
        assert_eq!(result.is_error, Some(true));

        let rendered = NormalizedResponse {
            is_error: false,
            segments: vec![
                Segment::Text("ok".to_string()),
                Segment::Json(serde_json::json!({"a": 1})),
            ],
        };
        let result = render(rendered);
        assert_eq!(result.is_error, Some(false));
    }
}
