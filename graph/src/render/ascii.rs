use super::text::name_field;
use crate::core::{NodeId, NodeStore};
use crate::layout::{Connector, ConnectorEntry, Joint, Row, RowLayout};
use std::io::{self, Write};

pub const DEFAULT_NAME_WIDTH: usize = 16;
/// Room for one character, the ellipsis and the two-column gap
pub const MIN_NAME_WIDTH: usize = 6;

/// Lead-in before each connector glyph
const LEAD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Columns per name field
    pub name_width: usize,
}

impl RenderConfig {
    pub fn new(name_width: usize) -> Self {
        Self {
            name_width: name_width.max(MIN_NAME_WIDTH),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_WIDTH)
    }
}

/// Plain-text renderer for the branch tree: one line of names per level,
/// with connector art under every level that branches
pub struct AsciiRenderer {
    config: RenderConfig,
}

impl AsciiRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Write the tree below `start` to `out`
    pub fn render<W: Write>(&self, store: &NodeStore, start: NodeId, out: &mut W) -> io::Result<()> {
        for line in self.lines(store, start) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    pub fn render_to_string(&self, store: &NodeStore, start: NodeId) -> String {
        self.lines(store, start)
            .into_iter()
            .map(|line| line + "\n")
            .collect()
    }

    /// Every output line, trailing whitespace trimmed
    pub fn lines(&self, store: &NodeStore, start: NodeId) -> Vec<String> {
        let mut lines = Vec::new();
        for row in RowLayout::new(store, start) {
            lines.push(self.names_line(store, &row).trim_end().to_string());
            if let Some(connector) = &row.connector {
                lines.extend(
                    self.connector_lines(connector)
                        .iter()
                        .map(|line| line.trim_end().to_string()),
                );
            }
        }
        lines
    }

    fn names_line(&self, store: &NodeStore, row: &Row) -> String {
        let width = self.config.name_width;
        row.slots
            .iter()
            .map(|slot| match slot {
                Some(id) => name_field(store.get(*id).display_name(), width),
                None => " ".repeat(width),
            })
            .collect()
    }

    fn connector_lines(&self, connector: &Connector) -> Vec<String> {
        let mut lines = Vec::with_capacity(connector.spread + 1);
        lines.push(connector.entries.iter().map(|e| self.joint_cell(e)).collect());
        for step in 1..=connector.spread {
            lines.push(
                connector
                    .entries
                    .iter()
                    .map(|e| self.drop_cell(e.joint, step))
                    .collect(),
            );
        }
        lines
    }

    /// First connector line: glyph plus dashes tying siblings together
    fn joint_cell(&self, entry: &ConnectorEntry) -> String {
        let width = self.config.name_width;
        let lead = if entry.sibling_before { "-" } else { " " }.repeat(LEAD);
        let fill = if entry.sibling_after { "-" } else { " " }.repeat(width - LEAD - 1);
        format!("{lead}{}{fill}", glyph(entry.joint))
    }

    /// Later connector lines: shifted glyphs drift right one column per line
    fn drop_cell(&self, joint: Joint, step: usize) -> String {
        let width = self.config.name_width;
        let offset = match joint {
            Joint::Shifted => (LEAD + step).min(width - 1),
            Joint::Under | Joint::Closed => LEAD,
        };
        format!(
            "{}{}{}",
            " ".repeat(offset),
            glyph(joint),
            " ".repeat(width - offset - 1)
        )
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

fn glyph(joint: Joint) -> char {
    match joint {
        Joint::Under => '|',
        Joint::Shifted => '\\',
        Joint::Closed => ' ',
    }
}
