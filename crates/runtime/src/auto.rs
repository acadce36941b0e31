//! Budget-bounded autonomous loop.
//!
//! Assess, generate a task, execute, repeat. Three guards stop the run:
//! the model declaring the goal complete, the dollar budget, and the
//! iteration cap. Which guard fired is recorded in the report.

use crate::{Runtime, dispatch};
use anyhow::Result;
use llm::{LLM, Message};
use pcore::parse_json;
use serde::{Deserialize, Serialize};

/// Why an autonomous run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The self-assessment declared the goal achieved.
    Complete,
    /// The spend cap was hit.
    Budget,
    /// The iteration cap was hit.
    Iterations,
}

/// One executed task in an autonomous run.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRecord {
    /// The generated task.
    pub task: String,
    /// The tool keyword dispatch chose.
    pub tool: String,
    /// What the tool returned.
    pub result: String,
}

/// The model's self-assessment of goal progress.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Assessment {
    /// Summary of the current state.
    #[serde(default)]
    pub assessment: String,
    /// Whether the goal is fully achieved.
    pub complete: bool,
    /// Estimated completion percentage.
    #[serde(default)]
    pub progress: u8,
    /// What the model thinks should happen next.
    #[serde(default)]
    pub suggested_next: String,
}

impl Assessment {
    /// The verdict used when the model's assessment cannot be parsed.
    fn fallback() -> Self {
        Self {
            assessment: "unable to assess progress".to_owned(),
            complete: false,
            progress: 25,
            suggested_next: "gather more information".to_owned(),
        }
    }
}

/// A completed autonomous run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// The goal pursued.
    pub goal: String,
    /// Which guard stopped the run.
    pub outcome: Outcome,
    /// Assess/execute iterations completed.
    pub iterations: usize,
    /// Tasks executed, in order.
    pub steps: Vec<TaskRecord>,
    /// Dollars spent during the run.
    pub spent: f64,
    /// The last self-assessment.
    pub assessment: Assessment,
}

/// The autonomous loop driver.
#[derive(Debug, Clone)]
pub struct Auto {
    /// Dollar spend cap per run.
    pub cost_limit: f64,
    /// Cap on assess/execute iterations.
    pub max_iterations: usize,
}

impl Default for Auto {
    fn default() -> Self {
        Self {
            cost_limit: 0.10,
            max_iterations: 5,
        }
    }
}

impl Auto {
    /// Create a driver with the given guards.
    pub fn new(cost_limit: f64, max_iterations: usize) -> Self {
        Self {
            cost_limit,
            max_iterations,
        }
    }

    /// Run the autonomous loop until a guard fires.
    pub async fn run<P: LLM>(&self, rt: &mut Runtime<P>, goal: &str) -> Result<RunReport> {
        let start = rt.meter().total();
        let mut report = RunReport {
            goal: goal.to_owned(),
            outcome: Outcome::Iterations,
            iterations: 0,
            steps: Vec::new(),
            spent: 0.0,
            assessment: Assessment::fallback(),
        };

        while report.iterations < self.max_iterations {
            report.spent = rt.meter().total() - start;
            if report.spent > self.cost_limit {
                tracing::warn!("cost limit reached: ${:.4} > ${:.2}", report.spent, self.cost_limit);
                report.outcome = Outcome::Budget;
                return Ok(report);
            }
            report.iterations += 1;

            report.assessment = self.assess(rt, goal, &report.steps).await?;
            if report.assessment.complete {
                report.outcome = Outcome::Complete;
                report.spent = rt.meter().total() - start;
                return Ok(report);
            }

            let task = self.next_task(rt, goal, &report.assessment, &report.steps).await?;
            let (tool, result) = dispatch(rt.tools(), &task).await;
            report.steps.push(TaskRecord { task, tool, result });
        }

        report.spent = rt.meter().total() - start;
        Ok(report)
    }

    /// Coerce a progress verdict out of the model.
    async fn assess<P: LLM>(
        &self,
        rt: &mut Runtime<P>,
        goal: &str,
        steps: &[TaskRecord],
    ) -> Result<Assessment> {
        let prompt = format!(
            "Goal: {goal}\n\nCurrent State:\n{}\n\nAssess the goal \
             completion and return JSON:\n{{\"assessment\": \"summary\", \
             \"complete\": true/false, \"progress\": 0-100, \
             \"suggested_next\": \"action\"}}",
            context_summary(steps),
        );

        let reply = rt.complete(&[Message::user(prompt)]).await?;
        Ok(parse_json(&reply.content).unwrap_or_else(|err| {
            tracing::warn!("assessment was not valid JSON: {err}");
            Assessment::fallback()
        }))
    }

    /// Ask the model for the single next task.
    async fn next_task<P: LLM>(
        &self,
        rt: &mut Runtime<P>,
        goal: &str,
        assessment: &Assessment,
        steps: &[TaskRecord],
    ) -> Result<String> {
        let prompt = format!(
            "Goal: {goal}\n\nCurrent Progress: {}%\nSuggested Priority: {}\n\n\
             Context:\n{}\n\nGenerate the single most important task to do \
             next. Make it specific, achievable with the available tools \
             (web_search, calculator, current_date), and different from \
             recent actions. Reply with the task text only.",
            assessment.progress,
            assessment.suggested_next,
            context_summary(steps),
        );

        let reply = rt.complete(&[Message::user(prompt)]).await?;
        let task = reply.content.lines().next().unwrap_or("").trim().to_owned();
        anyhow::ensure!(!task.is_empty(), "model produced an empty task");
        Ok(task)
    }
}

/// A bounded summary of what the run has done so far.
fn context_summary(steps: &[TaskRecord]) -> String {
    if steps.is_empty() {
        return "No actions taken yet.".to_owned();
    }

    let mut parts = vec![format!("Actions completed: {}", steps.len())];
    for record in steps.iter().rev().take(3).rev() {
        let task: String = record.task.chars().take(50).collect();
        let result: String = record.result.chars().take(100).collect();
        parts.push(format!("- [{}] {task}: {result}", record.tool));
    }
    parts.join("\n")
}
