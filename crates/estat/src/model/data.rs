//! `GET_STATS_DATA` envelope: tabular values with classification metadata.

use serde::Deserialize;

use super::meta::ClassInf;
use super::PaginationInf;
use super::ResultInfo;

/// Envelope returned by `getStatsData`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsDataResponse {
    #[serde(rename = "RESULT")]
    pub result: ResultInfo,
    #[serde(rename = "STATISTICAL_DATA")]
    pub statistical_data: Option<StatisticalData>,
}

/// `STATISTICAL_DATA` payload of a data response.
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticalData {
    #[serde(rename = "RESULT_INF")]
    pub result_inf: PaginationInf,
    #[serde(rename = "CLASS_INF", default)]
    pub class_inf: ClassInf,
    #[serde(rename = "DATA_INF")]
    pub data_inf: Option<DataInf>,
}

/// `DATA_INF`: the observation cells plus their side-channel explanations.
#[derive(Debug, Clone, Deserialize)]
pub struct DataInf {
    #[serde(rename = "NOTE", default)]
    pub notes: Vec<Note>,
    #[serde(rename = "ANNOTATION", default)]
    pub annotations: Vec<Annotation>,
    #[serde(rename = "VALUE", default)]
    pub values: Vec<ValueCell>,
}

/// `NOTE` element: a special-character legend entry. Parsed but not
/// rendered; the upstream descriptions are unreliable.
#[derive(Debug, Clone, Deserialize)]
pub struct Note {
    #[serde(rename = "@char")]
    pub symbol: String,
    #[serde(rename = "$text")]
    pub description: String,
}

/// `ANNOTATION` element: explanation of an annotation symbol attached to
/// value cells.
#[derive(Debug, Clone, Deserialize)]
pub struct Annotation {
    #[serde(rename = "@annotation")]
    pub symbol: String,
    #[serde(rename = "$text")]
    pub description: String,
}

/// One `VALUE` observation cell.
///
/// Which axis attributes are present varies per table; a table uses any
/// subset of the fifteen category axes plus tab, area, time and unit. The
/// cell text is the observation value itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValueCell {
    #[serde(rename = "@tab")]
    pub tab: Option<String>,
    #[serde(rename = "@cat01")]
    pub cat01: Option<String>,
    #[serde(rename = "@cat02")]
    pub cat02: Option<String>,
    #[serde(rename = "@cat03")]
    pub cat03: Option<String>,
    #[serde(rename = "@cat04")]
    pub cat04: Option<String>,
    #[serde(rename = "@cat05")]
    pub cat05: Option<String>,
    #[serde(rename = "@cat06")]
    pub cat06: Option<String>,
    #[serde(rename = "@cat07")]
    pub cat07: Option<String>,
    #[serde(rename = "@cat08")]
    pub cat08: Option<String>,
    #[serde(rename = "@cat09")]
    pub cat09: Option<String>,
    #[serde(rename = "@cat10")]
    pub cat10: Option<String>,
    #[serde(rename = "@cat11")]
    pub cat11: Option<String>,
    #[serde(rename = "@cat12")]
    pub cat12: Option<String>,
    #[serde(rename = "@cat13")]
    pub cat13: Option<String>,
    #[serde(rename = "@cat14")]
    pub cat14: Option<String>,
    #[serde(rename = "@cat15")]
    pub cat15: Option<String>,
    #[serde(rename = "@area")]
    pub area: Option<String>,
    #[serde(rename = "@time")]
    pub time: Option<String>,
    /// Unit display string; a literal, not a classification code.
    #[serde(rename = "@unit")]
    pub unit: Option<String>,
    /// Annotation symbol referencing a footnote.
    #[serde(rename = "@annotation")]
    pub annotation: Option<String>,
    #[serde(rename = "$text")]
    pub value: String,
}

impl ValueCell {
    /// Present axis attributes as ordered `(axis id, code)` pairs.
    ///
    /// The order is the fixed document order of the axis attributes (tab,
    /// cat01..cat15, area, time, unit), which downstream grouping relies on.
    pub fn axes(&self) -> Vec<(&'static str, &str)> {
        [
            ("tab", &self.tab),
            ("cat01", &self.cat01),
            ("cat02", &self.cat02),
            ("cat03", &self.cat03),
            ("cat04", &self.cat04),
            ("cat05", &self.cat05),
            ("cat06", &self.cat06),
            ("cat07", &self.cat07),
            ("cat08", &self.cat08),
            ("cat09", &self.cat09),
            ("cat10", &self.cat10),
            ("cat11", &self.cat11),
            ("cat12", &self.cat12),
            ("cat13", &self.cat13),
            ("cat14", &self.cat14),
            ("cat15", &self.cat15),
            ("area", &self.area),
            ("time", &self.time),
            ("unit", &self.unit),
        ]
        .into_iter()
        .filter_map(|(axis, code)| code.as_deref().map(|code| (axis, code)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_data_response() {
        let xml = r#"
            <GET_STATS_DATA>
                <RESULT>
                    <STATUS>0</STATUS>
                    <ERROR_MSG>正常に終了しました。</ERROR_MSG>
                </RESULT>
                <STATISTICAL_DATA>
                    <RESULT_INF>
                        <TOTAL_NUMBER>2</TOTAL_NUMBER>
                        <FROM_NUMBER>1</FROM_NUMBER>
                        <TO_NUMBER>2</TO_NUMBER>
                    </RESULT_INF>
                    <CLASS_INF>
                        <CLASS_OBJ id="cat01" name="男女">
                            <CLASS code="110" name="男" level="1"/>
                        </CLASS_OBJ>
                    </CLASS_INF>
                    <DATA_INF>
                        <NOTE char="-">データなし</NOTE>
                        <ANNOTATION annotation="*">暫定値</ANNOTATION>
                        <VALUE cat01="110" time="2020" unit="人">61349581</VALUE>
                        <VALUE cat01="120" time="2020" unit="人" annotation="*">64796518</VALUE>
                    </DATA_INF>
                </STATISTICAL_DATA>
            </GET_STATS_DATA>"#;

        let parsed: StatsDataResponse = quick_xml::de::from_str(xml).unwrap();
        let data = parsed.statistical_data.unwrap();
        assert_eq!(data.result_inf.total_number, Some(2));

        let data_inf = data.data_inf.unwrap();
        assert_eq!(data_inf.notes.len(), 1);
        assert_eq!(data_inf.annotations[0].symbol, "*");
        assert_eq!(data_inf.values.len(), 2);

        let cell = &data_inf.values[1];
        assert_eq!(cell.value, "64796518");
        assert_eq!(cell.annotation.as_deref(), Some("*"));
        assert_eq!(
            cell.axes(),
            vec![("cat01", "120"), ("time", "2020"), ("unit", "人")]
        );
    }

    #[test]
    fn test_axes_skip_absent_attributes() {
        let cell = ValueCell {
            tab: Some("020".to_string()),
            cat05: Some("A".to_string()),
            value: "1".to_string(),
            ..ValueCell::default()
        };
        assert_eq!(cell.axes(), vec![("tab", "020"), ("cat05", "A")]);
    }
}
