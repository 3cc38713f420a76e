use crate::domain::{IdType, Tool};
use crate::error::DavidError;

pub const MAX_QUERY_LENGTH: usize = 2048;

pub fn build_query_url(
    base_url: &str,
    ids: &[String],
    id_type: &IdType,
    tool: Tool,
    categories: &[String],
) -> String {
    let mut url = format!(
        "{base_url}api.jsp?type={}&ids={}&tool={}",
        id_type.as_str(),
        ids.join(","),
        tool.as_str()
    );
    if tool.takes_annotations() && !categories.is_empty() {
        url.push_str("&annot=");
        url.push_str(&categories.join(","));
    }
    url
}

pub fn check_query_length(url: &str) -> Result<(), DavidError> {
    let length = url.chars().count();
    if length > MAX_QUERY_LENGTH {
        return Err(DavidError::QueryTooLong {
            length,
            limit: MAX_QUERY_LENGTH,
        });
    }
    Ok(())
}
