use crate::error::DavidError;
use crate::transport::Transport;

pub fn fetch_table<T: Transport>(
    transport: &T,
    base_url: &str,
    link: &str,
) -> Result<Vec<String>, DavidError> {
    let url = format!("{base_url}{link}");
    tracing::info!(url = %url, "downloading DAVID report");
    let page = transport.get(&url)?;
    let lines = split_lines(&page.body);
    tracing::debug!(lines = lines.len(), "report downloaded");
    Ok(lines)
}

pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(|line| line.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_strips_line_endings() {
        assert_eq!(
            split_lines("a\tb\r\nc\td\n\ne"),
            vec!["a\tb", "c\td", "", "e"]
        );
    }
}
