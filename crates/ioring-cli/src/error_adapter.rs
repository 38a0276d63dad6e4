//! Rendering of IoRing errors as miette reports.
//!
//! A rejected intent graph yields one report per finding, with a snippet of
//! the JSON source. Layout failures have no source location, so their
//! report names the failure and says which instances or which stretch of a
//! side to change.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity, SourceSpan};

use ioring::{IoRingError, LayoutError};
use ioring_parser::{Diagnostic, Severity};

/// One miette report.
#[derive(Debug)]
pub enum Report<'a> {
    /// A finding in the intent-graph source.
    Finding { diag: &'a Diagnostic, src: &'a str },
    /// A failure outside the intent graph's syntax.
    Failure(&'a IoRingError),
}

/// Splits an error into the reports to render.
pub fn to_reports(err: &IoRingError) -> Vec<Report<'_>> {
    match err {
        IoRingError::Parse { err, src } => err
            .diagnostics()
            .iter()
            .map(|diag| Report::Finding { diag, src })
            .collect(),
        _ => vec![Report::Failure(err)],
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Finding { diag, .. } => f.write_str(diag.message()),
            Report::Failure(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Report<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Report::Finding { .. } => None,
            Report::Failure(err) => std::error::Error::source(*err),
        }
    }
}

impl MietteDiagnostic for Report<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code: Box<dyn fmt::Display> = match self {
            Report::Finding { diag, .. } => Box::new(diag.code()),
            Report::Failure(err) => Box::new(failure_code(err)),
        };
        Some(code)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        let severity = match self {
            Report::Finding { diag, .. } => diag.severity(),
            Report::Failure(_) => Severity::Error,
        };
        Some(match severity {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Report::Finding { diag, .. } => diag
                .help()
                .map(|help| Box::new(help) as Box<dyn fmt::Display>),
            Report::Failure(IoRingError::Layout(err)) => {
                layout_help(err).map(|help| Box::new(help) as Box<dyn fmt::Display>)
            }
            Report::Failure(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Report::Finding { src, .. } => Some(src as &dyn miette::SourceCode),
            Report::Failure(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Report::Finding { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }
        Some(Box::new(diag.labels().iter().map(|label| {
            let span = SourceSpan::new(label.span().start().into(), label.span().len());
            let text = Some(label.text().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(text, span)
            } else {
                LabeledSpan::new_with_span(text, span)
            }
        })))
    }
}

fn failure_code(err: &IoRingError) -> &'static str {
    match err {
        IoRingError::Io(_) => "ioring::io",
        IoRingError::Parse { .. } => "ioring::parse",
        IoRingError::Export(_) => "ioring::export",
        IoRingError::Layout(err) => match err {
            LayoutError::Configuration(_) => "ioring::layout::configuration",
            LayoutError::DuplicateName(_) => "ioring::layout::duplicate_name",
            LayoutError::InvalidPosition { .. } => "ioring::layout::invalid_position",
            LayoutError::InvalidWidth { .. } => "ioring::layout::invalid_width",
            LayoutError::DuplicateCorner { .. } => "ioring::layout::duplicate_corner",
            LayoutError::UnresolvedReference { .. } => "ioring::layout::unresolved_reference",
            LayoutError::InvalidReference { .. } => "ioring::layout::invalid_reference",
            LayoutError::CyclicReference { .. } => "ioring::layout::cyclic_reference",
            LayoutError::SideMismatch { .. } => "ioring::layout::side_mismatch",
            LayoutError::OffPerimeter { .. } => "ioring::layout::off_perimeter",
            LayoutError::Overlap { .. } => "ioring::layout::overlap",
            LayoutError::LayoutOverflow { .. } => "ioring::layout::overflow",
            LayoutError::SeparatorTooSmall { .. } => "ioring::layout::separator_too_small",
            LayoutError::UnfillableGap { .. } => "ioring::layout::unfillable_gap",
        },
    }
}

/// What to change in the intent graph or the filler catalog.
fn layout_help(err: &LayoutError) -> Option<String> {
    let help = match err {
        LayoutError::Configuration(_) => {
            "check `width`, `height` and `corner_size` in `ring_config`".to_string()
        }
        LayoutError::DuplicateName(name) => {
            format!("rename one of the instances called `{name}`")
        }
        LayoutError::InvalidPosition { instance, .. } => format!(
            "give `{instance}` an offset inside its side's usable span, or coordinates on a ring edge"
        ),
        LayoutError::InvalidWidth { instance, .. } => {
            format!("give `{instance}` a positive `width`, or drop it to use the ring default")
        }
        LayoutError::DuplicateCorner { second, .. } => {
            format!("move `{second}` to a free ring corner, or drop its position")
        }
        LayoutError::UnresolvedReference {
            instance,
            reference,
        } => format!("declare `{reference}`, or anchor `{instance}` with a side offset"),
        LayoutError::InvalidReference { kind, .. } => {
            format!("{kind} instances are not tiled on a side; refer to a pad instead")
        }
        LayoutError::CyclicReference { members } => format!(
            "give `{}` a side offset to break the cycle",
            members.first()?
        ),
        LayoutError::SideMismatch {
            declared, found, ..
        } => format!("drop `side`, or change it from {declared} to {found}"),
        LayoutError::OffPerimeter { instance, .. } => {
            format!("move `{instance}` onto a ring edge, between the corner cells")
        }
        LayoutError::Overlap {
            side,
            first,
            second,
        } => format!("move `{second}` past the end of `{first}` on side {side}"),
        LayoutError::LayoutOverflow {
            before,
            after,
            available,
            required,
            ..
        } => format!(
            "free {} more between `{before}` and `{after}`, or enlarge the ring",
            required.saturating_sub(*available)
        ),
        LayoutError::SeparatorTooSmall {
            before,
            after,
            required,
            ..
        } => format!("leave at least {required} between `{before}` and `{after}` for the separator"),
        LayoutError::UnfillableGap {
            side,
            start,
            end,
            length,
        } => format!(
            "shift a pad next to {start}..{end} on side {side}, or add a filler cell that tiles a gap of {length}"
        ),
    };
    Some(help)
}

#[cfg(test)]
mod tests {
    use std::io;

    use ioring::{RingBuilder, geometry::Side};

    use super::*;

    fn parse_failure(source: &str) -> IoRingError {
        RingBuilder::default()
            .parse(source)
            .expect_err("intent graph should be rejected")
    }

    fn text(value: Option<Box<dyn fmt::Display + '_>>) -> Option<String> {
        value.map(|value| value.to_string())
    }

    #[test]
    fn test_duplicate_name_points_at_both_definitions() {
        let err = parse_failure(
            r#"{
                "ring_config": {"width": 400, "height": 300},
                "instances": [
                    {"name": "VDD0", "device": "PVDD1", "side": "bottom", "position": 0},
                    {"name": "VDD0", "device": "PVDD1", "side": "bottom", "position": 40}
                ]
            }"#,
        );

        let reports = to_reports(&err);
        assert_eq!(reports.len(), 1);
        let report = &reports[0];

        assert_eq!(report.to_string(), "instance `VDD0` is defined multiple times");
        assert_eq!(text(report.code()).as_deref(), Some("E201"));
        assert_eq!(
            text(report.help()).as_deref(),
            Some("instance names must be unique within an intent graph")
        );
        assert!(report.source_code().is_some());

        let labels: Vec<_> = report.labels().expect("labels").collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert_eq!(labels[0].label(), Some("duplicate definition"));
        assert!(!labels[1].primary());
        assert!(labels[1].offset() < labels[0].offset());
    }

    #[test]
    fn test_rejected_graph_keeps_its_warnings() {
        let err = parse_failure(
            r#"{
                "ring_config": {"width": 400, "height": 300},
                "instances": [
                    {"name": "TP", "device": "PTEST", "type": "inner_pad", "side": "top", "position": [200, 150]},
                    {"name": "IO1", "device": "PDDW16", "side": "up", "position": 0}
                ]
            }"#,
        );

        let reports = to_reports(&err);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].severity(), Some(MietteSeverity::Warning));
        assert_eq!(text(reports[0].code()).as_deref(), Some("W200"));
        assert_eq!(reports[1].severity(), Some(MietteSeverity::Error));
        assert_eq!(text(reports[1].code()).as_deref(), Some("E203"));
    }

    #[test]
    fn test_unlocated_finding_has_no_snippet_labels() {
        let err = parse_failure(
            r#"{"ring_config": {"width": 400, "height": 300}, "instances": [{"device": "PVDD1"}]}"#,
        );

        let reports = to_reports(&err);
        assert_eq!(text(reports[0].code()).as_deref(), Some("E200"));
        assert!(reports[0].labels().is_none());
    }

    #[test]
    fn test_unfillable_gap_names_the_stretch() {
        let err = IoRingError::Layout(LayoutError::UnfillableGap {
            side: Side::Top,
            start: 30,
            end: 70,
            length: 40,
        });

        let reports = to_reports(&err);
        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(
            text(report.code()).as_deref(),
            Some("ioring::layout::unfillable_gap")
        );
        assert_eq!(
            text(report.help()).as_deref(),
            Some("shift a pad next to 30..70 on side top, or add a filler cell that tiles a gap of 40")
        );
        assert!(report.labels().is_none());
        assert!(report.source_code().is_none());
    }

    #[test]
    fn test_cycle_help_names_an_anchor() {
        let builder = RingBuilder::default();
        let graph = builder
            .parse(
                r#"{
                    "ring_config": {"width": 400, "height": 300, "corner_size": 50},
                    "instances": [
                        {"name": "A", "device": "PDDW16", "position": "B_40"},
                        {"name": "B", "device": "PDDW16", "position": "A_40"}
                    ]
                }"#,
            )
            .expect("intent graph should parse");
        let err = builder.layout(&graph).expect_err("cycle should fail");

        let reports = to_reports(&err);
        assert_eq!(
            text(reports[0].code()).as_deref(),
            Some("ioring::layout::cyclic_reference")
        );
        let help = text(reports[0].help()).expect("help");
        assert!(help.ends_with("a side offset to break the cycle"), "{help}");
    }

    #[test]
    fn test_overflow_help_reports_the_shortfall() {
        let err = IoRingError::Layout(LayoutError::LayoutOverflow {
            side: Side::Left,
            before: "IO1".to_string(),
            after: "IO2".to_string(),
            available: 25,
            required: 40,
        });

        let reports = to_reports(&err);
        assert_eq!(
            text(reports[0].help()).as_deref(),
            Some("free 15 more between `IO1` and `IO2`, or enlarge the ring")
        );
    }

    #[test]
    fn test_io_failure_keeps_its_cause() {
        let err = IoRingError::Io(io::Error::new(io::ErrorKind::NotFound, "ring.json"));

        let reports = to_reports(&err);
        let report = &reports[0];
        assert_eq!(text(report.code()).as_deref(), Some("ioring::io"));
        assert!(report.help().is_none());
        assert!(std::error::Error::source(report).is_some());
    }
}
