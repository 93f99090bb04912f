/*
[INPUT]:  Task execution history
[OUTPUT]: Latest-execution summary: derived status, display timestamps, raw output
[POS]:    Presentational model - command output viewer
[UPDATE]: When the API grows a structured execution status
*/

use std::fmt;

use chrono::{Local, TimeZone};
use taskpanel_client::{Task, TaskExecution, parse_timestamp};

pub const NO_HISTORY: &str = "No execution history available.";
pub const NO_OUTPUT: &str = "No output recorded.";
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Failed,
    Succeeded,
    RunningOrUnknown,
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExecutionStatus::Failed => "Failed",
            ExecutionStatus::Succeeded => "Succeeded",
            ExecutionStatus::RunningOrUnknown => "Running/Unknown",
        };
        f.write_str(label)
    }
}

/// Status guessed from the captured output text.
///
/// This is a heuristic: the API has no status field, so any output that
/// mentions "error" (any case) or the pod cleanup failure counts as failed.
pub fn derive_status(execution: &TaskExecution) -> ExecutionStatus {
    let output = execution.output.as_deref().unwrap_or_default();
    if output.to_lowercase().contains("error") || output.contains("Failed to clean up pod") {
        return ExecutionStatus::Failed;
    }
    let ended = execution
        .end_time
        .as_deref()
        .is_some_and(|end| !end.is_empty());
    if ended && !output.is_empty() {
        return ExecutionStatus::Succeeded;
    }
    ExecutionStatus::RunningOrUnknown
}

/// Display text for a timestamp in the local time zone.
pub fn format_timestamp(text: Option<&str>) -> String {
    format_timestamp_in(text, &Local)
}

pub fn format_timestamp_in<Tz>(text: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match text {
        None => "N/A".to_string(),
        Some(text) if text.is_empty() => "N/A".to_string(),
        Some(text) => match parse_timestamp(text) {
            Some(parsed) => parsed.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
            None => "Invalid Date".to_string(),
        },
    }
}

/// Everything the output view shows for the latest execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestExecution {
    pub status: ExecutionStatus,
    pub started: String,
    pub ended: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputView {
    NoHistory,
    Latest(LatestExecution),
}

impl OutputView {
    pub fn from_task(task: &Task) -> Self {
        Self::from_task_in(task, &Local)
    }

    pub fn from_task_in<Tz>(task: &Task, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let Some(execution) = task.latest_execution() else {
            return OutputView::NoHistory;
        };
        let output = match execution.output.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => NO_OUTPUT.to_string(),
        };
        OutputView::Latest(LatestExecution {
            status: derive_status(execution),
            started: format_timestamp_in(execution.start_time.as_deref(), tz),
            ended: format_timestamp_in(execution.end_time.as_deref(), tz),
            output,
        })
    }

    /// Plain-text rendering, used by the CLI.
    pub fn to_text(&self) -> String {
        match self {
            OutputView::NoHistory => NO_HISTORY.to_string(),
            OutputView::Latest(latest) => format!(
                "Status: {}\nStart:  {}\nEnd:    {}\n\n{}",
                latest.status, latest.started, latest.ended, latest.output
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn execution(end_time: Option<&str>, output: Option<&str>) -> TaskExecution {
        TaskExecution {
            id: None,
            start_time: Some("2024-01-01T00:00:00Z".to_string()),
            end_time: end_time.map(str::to_string),
            output: output.map(str::to_string),
        }
    }

    #[rstest]
    #[case(Some("2024-01-01T00:00:01Z"), Some("hi"), ExecutionStatus::Succeeded)]
    #[case(Some("2024-01-01T00:00:01Z"), Some("ERROR: disk full"), ExecutionStatus::Failed)]
    #[case(Some("2024-01-01T00:00:01Z"), Some("0 errors"), ExecutionStatus::Failed)]
    #[case(None, Some("Failed to clean up pod task-exec-1"), ExecutionStatus::Failed)]
    #[case(
        Some("2024-01-01T00:00:01Z"),
        Some("failed to clean up pod"),
        ExecutionStatus::Succeeded
    )]
    #[case(None, Some("hi"), ExecutionStatus::RunningOrUnknown)]
    #[case(Some(""), Some("hi"), ExecutionStatus::RunningOrUnknown)]
    #[case(Some("2024-01-01T00:00:01Z"), None, ExecutionStatus::RunningOrUnknown)]
    #[case(Some("2024-01-01T00:00:01Z"), Some(""), ExecutionStatus::RunningOrUnknown)]
    fn test_derive_status(
        #[case] end_time: Option<&str>,
        #[case] output: Option<&str>,
        #[case] expected: ExecutionStatus,
    ) {
        assert_eq!(derive_status(&execution(end_time, output)), expected);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp_in(None, &Utc), "N/A");
        assert_eq!(format_timestamp_in(Some(""), &Utc), "N/A");
        assert_eq!(format_timestamp_in(Some("garbage"), &Utc), "Invalid Date");
        assert_eq!(
            format_timestamp_in(Some("2024-01-01T00:00:01Z"), &Utc),
            "2024-01-01 00:00:01"
        );
    }

    #[test]
    fn test_no_history() {
        let view = OutputView::from_task_in(&Task::default(), &Utc);
        assert_eq!(view, OutputView::NoHistory);
        assert_eq!(view.to_text(), NO_HISTORY);
    }

    #[test]
    fn test_latest_execution_summary() {
        let task = Task {
            id: Some("t1".to_string()),
            task_executions: vec![
                execution(Some("2024-01-01T00:00:01Z"), Some("boom error")),
                execution(Some("2024-01-01T00:00:01Z"), Some("hi")),
            ],
            ..Task::default()
        };
        let OutputView::Latest(latest) = OutputView::from_task_in(&task, &Utc) else {
            panic!("expected latest execution");
        };
        assert_eq!(latest.status, ExecutionStatus::Succeeded);
        assert_eq!(latest.started, "2024-01-01 00:00:00");
        assert_eq!(latest.ended, "2024-01-01 00:00:01");
        assert_eq!(latest.output, "hi");
    }

    #[test]
    fn test_missing_output_placeholder() {
        let task = Task {
            task_executions: vec![execution(None, None)],
            ..Task::default()
        };
        let OutputView::Latest(latest) = OutputView::from_task_in(&task, &Utc) else {
            panic!("expected latest execution");
        };
        assert_eq!(latest.output, NO_OUTPUT);
        assert_eq!(latest.ended, "N/A");
        assert_eq!(latest.status, ExecutionStatus::RunningOrUnknown);
    }
}
