use tracing::{trace, warn};

use super::model::{GradleGav, GradleTreeNode, ReplacedGradleGav};

/// Layout conventions of the tree-formatted report.
///
/// Kept as data rather than literals in the parsing logic: the glyphs and
/// the column width are properties of the tool that produced the report,
/// and have varied across Gradle versions.
#[derive(Debug, Clone)]
pub struct TreeParseConfig {
    /// Tokens that terminate the branch drawing (`+---`, `\---`).
    pub level_terminals: &'static [&'static str],
    /// Substrings marking a sub-project line.
    pub project_indicators: &'static [&'static str],
    /// Prefix immediately before the component coordinate.
    pub component_prefix: &'static str,
    /// Trailing annotations stripped before splitting, repeatedly until
    /// none match.
    pub remove_suffixes: &'static [&'static str],
    /// Conflict-resolution marker; text after it is the winning coordinate.
    pub winning_indicator: &'static str,
    /// Column width of one vertical-continuation slot.
    pub continuation_width: usize,
}

impl Default for TreeParseConfig {
    fn default() -> Self {
        Self {
            level_terminals: &["+---", "\\---"],
            project_indicators: &["--- project "],
            component_prefix: "--- ",
            remove_suffixes: &[" (*)", " (c)", " (n)"],
            winning_indicator: " -> ",
            continuation_width: 5,
        }
    }
}

/// Line parser for hierarchical, indentation-delimited dependency reports.
///
/// Depth is encoded in leading branch glyphs and continuation columns, not
/// nesting syntax, so the parser first derives a level for every line and
/// then classifies the payload.
#[derive(Debug, Default)]
pub struct GradleReportLineParser {
    config: TreeParseConfig,
}

impl GradleReportLineParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TreeParseConfig) -> Self {
        Self { config }
    }

    pub fn parse_line(&self, line: &str) -> GradleTreeNode {
        let level = self.parse_tree_level(line);
        if !line.contains(self.config.component_prefix) {
            return GradleTreeNode::new_unknown(level);
        }
        if self
            .config
            .project_indicators
            .iter()
            .any(|indicator| line.contains(indicator))
        {
            let project_name = self.parse_project_name(line);
            return GradleTreeNode::new_project(level, project_name);
        }

        let (gav_pieces, replaced_pieces) = self.parse_gav(line);
        if gav_pieces.len() != 3 {
            // e.g. unresolved project lines: +--- org.springframework:starter (n)
            trace!(line, "Line cannot be split into the necessary coordinate parts");
            return GradleTreeNode::new_unknown(level);
        }
        let gav = GradleGav::new(&gav_pieces[0], &gav_pieces[1], &gav_pieces[2]);

        match replaced_pieces.len() {
            0 => GradleTreeNode::new_gav(level, gav),
            2 => GradleTreeNode::new_gav_with_replacement(
                level,
                gav,
                ReplacedGradleGav {
                    group: replaced_pieces[0].clone(),
                    artifact: replaced_pieces[1].clone(),
                    version: None,
                },
            ),
            3 => GradleTreeNode::new_gav_with_replacement(
                level,
                gav,
                ReplacedGradleGav {
                    group: replaced_pieces[0].clone(),
                    artifact: replaced_pieces[1].clone(),
                    version: Some(replaced_pieces[2].clone()),
                },
            ),
            _ => {
                warn!(line, "The replaced coordinate is in an unknown format");
                GradleTreeNode::new_gav(level, gav)
            }
        }
    }

    fn parse_project_name(&self, line: &str) -> String {
        let mut cleaned = line.trim().to_string();
        for indicator in self.config.project_indicators {
            if let Some(idx) = cleaned.find(indicator) {
                cleaned = cleaned[idx + indicator.len()..].to_string();
            }
        }
        self.remove_suffixes(&cleaned)
    }

    /// Strip trailing annotations, repeatedly until none match, so stacked
    /// suffixes like ` (*) (c)` disappear entirely.
    fn remove_suffixes(&self, line: &str) -> String {
        let mut result = line.to_string();
        loop {
            let mut stripped = false;
            for suffix in self.config.remove_suffixes {
                if let Some(prefix) = result.strip_suffix(suffix) {
                    result = prefix.to_string();
                    stripped = true;
                }
            }
            if !stripped {
                return result;
            }
        }
    }

    /// Split the payload into coordinate pieces, honoring the winning
    /// indicator: everything after it is the winning coordinate, either a
    /// full triple or a bare version that substitutes only the version
    /// field. Returns `(winning_pieces, losing_pieces)`; losing is empty
    /// when no indicator is present.
    fn parse_gav(&self, line: &str) -> (Vec<String>, Vec<String>) {
        let mut cleaned = line.trim().to_string();
        if let Some(idx) = cleaned.find(self.config.component_prefix) {
            cleaned = cleaned[idx + self.config.component_prefix.len()..].to_string();
        }
        cleaned = self.remove_suffixes(&cleaned);

        let mut gav_pieces: Vec<String> = cleaned.split(':').map(str::to_string).collect();
        let Some(arrow_idx) = cleaned.find(self.config.winning_indicator) else {
            return (gav_pieces, Vec::new());
        };

        let winning = cleaned[arrow_idx + self.config.winning_indicator.len()..].to_string();
        let losing = cleaned[..arrow_idx].to_string();

        if winning.contains(':') {
            // The indicator points at an entire replacement coordinate.
            gav_pieces = winning.split(':').map(str::to_string).collect();
        } else {
            // The indicator is not always preceded by a `:`; when it is not,
            // the artifact piece still carries the arrow and there is no
            // version slot yet.
            if gav_pieces.len() >= 2 && gav_pieces[1].contains(self.config.winning_indicator) {
                let artifact_end = gav_pieces[1]
                    .find(self.config.winning_indicator)
                    .unwrap_or(gav_pieces[1].len());
                gav_pieces[1].truncate(artifact_end);
                gav_pieces.push(String::new());
            }
            if let Some(version_piece) = gav_pieces.get_mut(2) {
                *version_piece = winning;
            }
        }

        let losing_pieces = losing.split(':').map(str::to_string).collect();
        (gav_pieces, losing_pieces)
    }

    /// Derive the depth of a line from its branch glyphs and continuation
    /// columns. Level 0 is a line beginning with a branch terminal.
    fn parse_tree_level(&self, line: &str) -> usize {
        if self
            .config
            .level_terminals
            .iter()
            .any(|terminal| line.starts_with(terminal))
        {
            return 0;
        }

        let mut modified = self.truncate_at_terminal(line);

        if !modified.starts_with('|') && modified.starts_with(' ') {
            modified.insert(0, '|');
        }
        // Runs of filler spaces stand for a vertical-continuation column.
        let filler = " ".repeat(self.config.continuation_width);
        let marker = format!("{}|", " ".repeat(self.config.continuation_width - 1));
        modified = modified.replace(&filler, &marker);
        modified = modified.replace("||", "|");
        if modified.ends_with('|') && modified.len() >= self.config.continuation_width {
            modified.truncate(modified.len() - self.config.continuation_width);
        }

        modified.chars().filter(|c| *c == '|').count()
    }

    /// Keep only the indentation prefix: everything from the first branch
    /// terminal onward is payload.
    fn truncate_at_terminal(&self, line: &str) -> String {
        let cut = self
            .config
            .level_terminals
            .iter()
            .filter_map(|terminal| line.find(terminal))
            .min()
            .unwrap_or(line.len());
        line[..cut].to_string()
    }
}
