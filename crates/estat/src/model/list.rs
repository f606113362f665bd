//! `GET_STATS_LIST` envelope: table listings and survey-name listings.

use serde::Deserialize;

use super::{CodedName, PaginationInf, ResultInfo};

/// Envelope returned by `getStatsList`.
///
/// The same endpoint serves two shapes: full `TABLE_INF` rows, or compact
/// `LIST_INF` rows when requested with `statsNameList=Y`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsListResponse {
    #[serde(rename = "RESULT")]
    pub result: ResultInfo,
    #[serde(rename = "DATALIST_INF")]
    pub data_list: Option<DataListInf>,
}

/// `DATALIST_INF` payload of a listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct DataListInf {
    #[serde(rename = "NUMBER", default)]
    pub number: Option<u32>,
    #[serde(rename = "RESULT_INF")]
    pub result_inf: PaginationInf,
    /// Table rows; empty in names-only mode.
    #[serde(rename = "TABLE_INF", default)]
    pub tables: Vec<TableInf>,
    /// Survey rows; populated only in names-only mode.
    #[serde(rename = "LIST_INF", default)]
    pub surveys: Vec<ListInf>,
}

/// One `TABLE_INF` row of a table listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TableInf {
    /// Table ID (`statsDataId` in requests).
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "STAT_NAME")]
    pub stat_name: CodedName,
    /// Governing ministry or agency.
    #[serde(rename = "GOV_ORG")]
    pub gov_org: CodedName,
    /// Full survey/statistics name the table belongs to.
    #[serde(rename = "STATISTICS_NAME")]
    pub statistics_name: String,
    #[serde(rename = "TITLE")]
    pub title: Title,
}

/// `TITLE` element: table title text with an optional table number.
#[derive(Debug, Clone, Deserialize)]
pub struct Title {
    #[serde(rename = "@no")]
    pub no: Option<String>,
    #[serde(rename = "$text")]
    pub text: String,
}

/// One `LIST_INF` row of a names-only listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListInf {
    /// Survey code (`statsCode` in requests).
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "STAT_NAME")]
    pub stat_name: CodedName,
    #[serde(rename = "GOV_ORG")]
    pub gov_org: CodedName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_table_listing() {
        let xml = r#"
            <GET_STATS_LIST>
                <RESULT>
                    <STATUS>0</STATUS>
                    <ERROR_MSG>正常に終了しました。</ERROR_MSG>
                </RESULT>
                <DATALIST_INF>
                    <NUMBER>1</NUMBER>
                    <RESULT_INF>
                        <FROM_NUMBER>1</FROM_NUMBER>
                        <TO_NUMBER>1</TO_NUMBER>
                    </RESULT_INF>
                    <TABLE_INF id="0003448237">
                        <STAT_NAME code="00200521">国勢調査</STAT_NAME>
                        <GOV_ORG code="00200">総務省</GOV_ORG>
                        <STATISTICS_NAME>令和2年国勢調査 人口等基本集計</STATISTICS_NAME>
                        <TITLE no="1-1">男女別人口－全国，都道府県</TITLE>
                    </TABLE_INF>
                </DATALIST_INF>
            </GET_STATS_LIST>"#;

        let parsed: StatsListResponse = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(parsed.result.status, 0);

        let data_list = parsed.data_list.unwrap();
        assert_eq!(data_list.number, Some(1));
        assert_eq!(data_list.result_inf.next_key, None);
        assert_eq!(data_list.tables.len(), 1);
        assert!(data_list.surveys.is_empty());

        let table = &data_list.tables[0];
        assert_eq!(table.id, "0003448237");
        assert_eq!(table.gov_org.name, "総務省");
        assert_eq!(table.title.no.as_deref(), Some("1-1"));
        assert_eq!(table.title.text, "男女別人口－全国，都道府県");
    }

    #[test]
    fn test_deserialize_survey_listing() {
        let xml = r#"
            <GET_STATS_LIST>
                <RESULT>
                    <STATUS>0</STATUS>
                    <ERROR_MSG>正常に終了しました。</ERROR_MSG>
                </RESULT>
                <DATALIST_INF>
                    <NUMBER>2</NUMBER>
                    <RESULT_INF>
                        <FROM_NUMBER>1</FROM_NUMBER>
                        <TO_NUMBER>2</TO_NUMBER>
                        <NEXT_KEY>3</NEXT_KEY>
                    </RESULT_INF>
                    <LIST_INF id="00200521">
                        <STAT_NAME code="00200521">国勢調査</STAT_NAME>
                        <GOV_ORG code="00200">総務省</GOV_ORG>
                    </LIST_INF>
                    <LIST_INF id="00200522">
                        <STAT_NAME code="00200522">住宅・土地統計調査</STAT_NAME>
                        <GOV_ORG code="00200">総務省</GOV_ORG>
                    </LIST_INF>
                </DATALIST_INF>
            </GET_STATS_LIST>"#;

        let parsed: StatsListResponse = quick_xml::de::from_str(xml).unwrap();
        let data_list = parsed.data_list.unwrap();
        assert_eq!(data_list.result_inf.next_key, Some(3));
        assert!(data_list.tables.is_empty());
        assert_eq!(data_list.surveys.len(), 2);
        assert_eq!(data_list.surveys[1].stat_name.name, "住宅・土地統計調査");
    }

    #[test]
    fn test_deserialize_upstream_error() {
        let xml = r#"
            <GET_STATS_LIST>
                <RESULT>
                    <STATUS>100</STATUS>
                    <ERROR_MSG>該当データはありません。</ERROR_MSG>
                </RESULT>
            </GET_STATS_LIST>"#;

        let parsed: StatsListResponse = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(parsed.result.status, 100);
        assert!(parsed.data_list.is_none());
    }
}
