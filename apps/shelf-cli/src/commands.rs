//! Argument and interactive-line parsing.
use shelf_core::{Intent, ItemId};

pub const BROWSE_HELP: &str = "\
Interactive commands:
  <text>             - Search as you type (debounced)
  /submit <text>     - Search immediately
  /sort <key>        - none | price-ascending | price-descending | name | author | category
  /category <name>   - Filter by category ('all' to clear)
  /fav <id>          - Add an item to favourites
  /reset             - Clear search, sort and category
  /help              - Show this help message
  /quit              - Exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Intent(Intent),
    Help,
    Quit,
}

pub fn parse_browse_line(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if !line.starts_with('/') {
        return Ok(BrowseCommand::Intent(Intent::SearchTextChanged(line.to_string())));
    }
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    match command {
        "/help" | "/h" => Ok(BrowseCommand::Help),
        "/quit" | "/q" => Ok(BrowseCommand::Quit),
        "/submit" => Ok(BrowseCommand::Intent(Intent::SearchSubmitted(rest.to_string()))),
        "/sort" => Ok(BrowseCommand::Intent(Intent::SortKeyChanged(rest.to_string()))),
        "/category" | "/c" => Ok(BrowseCommand::Intent(Intent::CategoryChanged(rest.to_string()))),
        "/reset" => Ok(BrowseCommand::Intent(Intent::Reset)),
        "/fav" => parse_id(rest).map(|id| BrowseCommand::Intent(Intent::AddToFavourites(id))),
        other => Err(format!("Unknown command: {other} (try /help)")),
    }
}

pub fn parse_id(value: &str) -> Result<ItemId, String> { value.trim().parse().map_err(|_| format!("'{value}' is not an item id")) }

/// Flags of `shelf query`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    pub search: String,
    pub sort: String,
    pub category: String,
}

pub fn parse_query_args(args: &[String]) -> Result<QueryArgs, String> {
    let mut parsed = QueryArgs { category: "all".to_string(), ..QueryArgs::default() };
    let mut i = 0;
    while i < args.len() {
        let slot = match args[i].as_str() {
            "--search" | "-s" => &mut parsed.search,
            "--sort" => &mut parsed.sort,
            "--category" | "-c" => &mut parsed.category,
            other => return Err(format!("Unknown flag: {other}")),
        };
        let value = args.get(i + 1).ok_or_else(|| format!("{} requires a value", args[i]))?;
        *slot = value.clone();
        i += 2;
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_typed_search_text() {
        assert_eq!(parse_browse_line("dune (1965)\n").unwrap(), BrowseCommand::Intent(Intent::SearchTextChanged("dune (1965)".into())));
        assert_eq!(parse_browse_line("").unwrap(), BrowseCommand::Intent(Intent::SearchTextChanged(String::new())));
    }

    #[test]
    fn slash_commands() {
        assert_eq!(parse_browse_line("/sort price-descending").unwrap(), BrowseCommand::Intent(Intent::SortKeyChanged("price-descending".into())));
        assert_eq!(parse_browse_line("/category scifi").unwrap(), BrowseCommand::Intent(Intent::CategoryChanged("scifi".into())));
        assert_eq!(parse_browse_line("/fav 12").unwrap(), BrowseCommand::Intent(Intent::AddToFavourites(12)));
        assert_eq!(parse_browse_line("/submit the hobbit").unwrap(), BrowseCommand::Intent(Intent::SearchSubmitted("the hobbit".into())));
        assert_eq!(parse_browse_line("/reset").unwrap(), BrowseCommand::Intent(Intent::Reset));
        assert_eq!(parse_browse_line("/quit").unwrap(), BrowseCommand::Quit);
        assert_eq!(parse_browse_line("/help").unwrap(), BrowseCommand::Help);
        assert!(parse_browse_line("/fav twelve").is_err());
        assert!(parse_browse_line("/rate 5").is_err());
    }

    #[test]
    fn query_flags() {
        let args: Vec<String> = ["--search", "o", "--sort", "name"].iter().map(|s| s.to_string()).collect();
        assert_eq!(parse_query_args(&args).unwrap(), QueryArgs { search: "o".into(), sort: "name".into(), category: "all".into() });
        assert!(parse_query_args(&["--sort".to_string()]).is_err());
        assert!(parse_query_args(&["--limit".to_string(), "3".to_string()]).is_err());
    }
}
