use dockerls_core::Analysis;
use tower_lsp::lsp_types::{FoldingRange, FoldingRangeKind};

use super::DockerAnalyzer;

impl DockerAnalyzer {
    /// Multi-line instructions and runs of two or more comment lines.
    pub fn folding_ranges(&self, model: &Analysis) -> Vec<FoldingRange> {
        let document = &model.document;
        let mut ranges = Vec::new();

        for inst in &model.dockerfile.instructions {
            let start = document.line_of(inst.span.start) as u32;
            let end = document.line_of(inst.span.end) as u32;
            if end > start {
                ranges.push(FoldingRange {
                    start_line: start,
                    end_line: end,
                    kind: Some(FoldingRangeKind::Region),
                    ..Default::default()
                });
            }
        }

        let mut lines: Vec<u32> = model
            .dockerfile
            .comments
            .iter()
            .map(|c| document.line_of(c.span.start) as u32)
            .collect();
        lines.sort_unstable();
        lines.dedup();
        let mut block: Option<(u32, u32)> = None;
        for line in lines {
            block = match block {
                Some((start, end)) if line == end + 1 => Some((start, line)),
                Some((start, end)) => {
                    push_comment_block(&mut ranges, start, end);
                    Some((line, line))
                }
                None => Some((line, line)),
            };
        }
        if let Some((start, end)) = block {
            push_comment_block(&mut ranges, start, end);
        }

        ranges.sort_by_key(|r| r.start_line);
        ranges
    }
}

fn push_comment_block(ranges: &mut Vec<FoldingRange>, start: u32, end: u32) {
    if end > start {
        ranges.push(FoldingRange {
            start_line: start,
            end_line: end,
            kind: Some(FoldingRangeKind::Comment),
            ..Default::default()
        });
    }
}
