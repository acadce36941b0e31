//! Plan-Act-Reflect loop.
//!
//! Three roles over the same model: a planner that breaks the goal into
//! steps, an executor that runs each step through keyword tool dispatch,
//! and a critic that judges the results. If the critic is unsatisfied
//! the cycle repeats with the reflection folded into the next plan.

use crate::{Runtime, dispatch};
use anyhow::Result;
use llm::{LLM, Message};
use pcore::parse_json;
use serde::{Deserialize, Serialize};

/// One executed plan step.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    /// The planned step text.
    pub step: String,
    /// The tool keyword dispatch chose.
    pub tool: String,
    /// What the tool returned.
    pub result: String,
}

/// The critic's verdict on one plan-act cycle.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Reflection {
    /// Whether the goal was achieved.
    pub complete: bool,
    /// The critic's summary of the outcome.
    #[serde(default)]
    pub assessment: String,
    /// What is still missing, when incomplete.
    #[serde(default)]
    pub missing: String,
}

/// A completed Plan-Act-Reflect run.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    /// The goal pursued.
    pub goal: String,
    /// The final plan's steps.
    pub plan: Vec<String>,
    /// Execution results for the final plan.
    pub results: Vec<StepResult>,
    /// The final reflection.
    pub reflection: Reflection,
    /// Plan-act-reflect cycles run.
    pub iterations: usize,
}

/// The Plan-Act-Reflect driver.
#[derive(Debug, Clone)]
pub struct Planner {
    /// Cap on plan-act-reflect cycles.
    pub max_iterations: usize,
}

impl Default for Planner {
    fn default() -> Self {
        Self { max_iterations: 2 }
    }
}

impl Planner {
    /// Create a driver with the given cycle cap.
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    /// Run plan-act-reflect cycles until the critic is satisfied or the
    /// cap is reached.
    pub async fn run<P: LLM>(&self, rt: &mut Runtime<P>, goal: &str) -> Result<PlanReport> {
        let mut report = PlanReport {
            goal: goal.to_owned(),
            plan: Vec::new(),
            results: Vec::new(),
            reflection: Reflection {
                complete: false,
                assessment: String::new(),
                missing: String::new(),
            },
            iterations: 0,
        };
        let mut previous: Option<Reflection> = None;

        for _ in 0..self.max_iterations {
            report.iterations += 1;
            report.plan = self.plan(rt, goal, previous.as_ref()).await?;

            report.results.clear();
            for step in &report.plan {
                let (tool, result) = dispatch(rt.tools(), step).await;
                report.results.push(StepResult {
                    step: step.clone(),
                    tool,
                    result,
                });
            }

            report.reflection = self.reflect(rt, goal, &report.plan, &report.results).await?;
            if report.reflection.complete {
                break;
            }
            previous = Some(report.reflection.clone());
        }

        Ok(report)
    }

    /// Ask the model for a step list.
    async fn plan<P: LLM>(
        &self,
        rt: &mut Runtime<P>,
        goal: &str,
        previous: Option<&Reflection>,
    ) -> Result<Vec<String>> {
        let mut prompt = format!(
            "You are a strategic planner. Break down this goal into clear, \
             executable steps.\n\nGoal: {goal}\n\nEach step should be \
             something that can be executed with available tools \
             (web_search, calculator, current_date).\n\nReturn your plan \
             as JSON:\n{{\"steps\": [\"step 1 description\", \"step 2 \
             description\", ...]}}\n\nMake each step specific and focused \
             on a single action."
        );
        if let Some(reflection) = previous {
            prompt.push_str(&format!(
                "\n\nA previous attempt fell short: {}. Still missing: {}. \
                 Plan around that.",
                reflection.assessment, reflection.missing
            ));
        }

        let reply = rt.complete(&[Message::user(prompt)]).await?;

        #[derive(Deserialize)]
        struct Plan {
            steps: Vec<String>,
        }

        let steps = match parse_json::<Plan>(&reply.content) {
            Ok(plan) => plan.steps,
            Err(err) => {
                tracing::warn!("plan was not valid JSON ({err}), parsing lines");
                numbered_lines(&reply.content)
            }
        };
        anyhow::ensure!(!steps.is_empty(), "planner produced no steps: {}", reply.content);
        Ok(steps)
    }

    /// Ask the model to judge the results.
    ///
    /// A malformed verdict counts as incomplete rather than erroring the
    /// run.
    async fn reflect<P: LLM>(
        &self,
        rt: &mut Runtime<P>,
        goal: &str,
        plan: &[String],
        results: &[StepResult],
    ) -> Result<Reflection> {
        let planned: Vec<String> = plan
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {step}", i + 1))
            .collect();
        let executed: Vec<String> = results
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let preview: String = r.result.chars().take(100).collect();
                format!("Step {}: [{}] {preview}", i + 1, r.tool)
            })
            .collect();

        let prompt = format!(
            "You are a critical evaluator. Assess whether the goal was \
             successfully achieved.\n\nGoal: {goal}\n\nPlanned Steps:\n{}\n\n\
             Execution Results:\n{}\n\nProvide your assessment as JSON:\n\
             {{\"complete\": true/false, \"assessment\": \"summary\", \
             \"missing\": \"what is still needed\"}}",
            planned.join("\n"),
            executed.join("\n"),
        );

        let reply = rt.complete(&[Message::user(prompt)]).await?;
        Ok(parse_json(&reply.content).unwrap_or_else(|err| {
            tracing::warn!("reflection was not valid JSON: {err}");
            Reflection {
                complete: false,
                assessment: "unable to evaluate results".to_owned(),
                missing: "a readable reflection".to_owned(),
            }
        }))
    }
}

/// Fallback plan parsing: numbered or bulleted lines.
fn numbered_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            let rest = line
                .strip_prefix(|c: char| c.is_ascii_digit())
                .and_then(|r| r.trim_start_matches(|c: char| c.is_ascii_digit()).strip_prefix('.'))
                .or_else(|| line.strip_prefix("- "));
            rest.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm::{Params, Scripted};
    use pcore::{Tool, handler};

    fn runtime(replies: &[&str]) -> Runtime<Scripted> {
        let mut rt = Runtime::new(
            Params::new("claude-3-haiku-20240307"),
            Scripted::with_replies(replies.iter().copied()),
        );
        for name in ["web_search", "calculator", "current_date"] {
            rt.register(
                Tool::new(name, ""),
                handler(move |input| async move { format!("{name} ran: {input}") }),
            );
        }
        rt
    }

    #[tokio::test]
    async fn single_cycle_when_complete() {
        let mut rt = runtime(&[
            r#"{"steps": ["Search for the population of Tokyo", "Calculate the square root"]}"#,
            r#"{"complete": true, "assessment": "goal met", "missing": ""}"#,
        ]);
        let report = Planner::default()
            .run(&mut rt, "square root of Tokyo's population")
            .await
            .unwrap();

        assert_eq!(report.iterations, 1);
        assert_eq!(report.plan.len(), 2);
        assert_eq!(report.results[0].tool, "web_search");
        assert_eq!(report.results[1].tool, "calculator");
        assert!(report.reflection.complete);
    }

    #[tokio::test]
    async fn replans_after_negative_reflection() {
        let mut rt = runtime(&[
            r#"{"steps": ["Search for city data"]}"#,
            r#"{"complete": false, "assessment": "thin", "missing": "population numbers"}"#,
            r#"{"steps": ["Search for population numbers", "Calculate the average"]}"#,
            r#"{"complete": true, "assessment": "done", "missing": ""}"#,
        ]);
        let scripted = rt.provider.clone();
        let report = Planner::default().run(&mut rt, "average city size").await.unwrap();

        assert_eq!(report.iterations, 2);
        assert_eq!(report.plan.len(), 2);
        assert!(report.reflection.complete);

        // the second plan prompt carries the first reflection
        let replan = &scripted.prompts()[2][0].content;
        assert!(replan.contains("population numbers"));
    }

    #[tokio::test]
    async fn falls_back_to_numbered_lines() {
        let mut rt = runtime(&[
            "Here is my plan:\n1. Search for the data\n2. Calculate the total",
            r#"{"complete": true, "assessment": "ok", "missing": ""}"#,
        ]);
        let report = Planner::default().run(&mut rt, "goal").await.unwrap();
        assert_eq!(report.plan, vec!["Search for the data", "Calculate the total"]);
    }

    #[tokio::test]
    async fn malformed_reflection_counts_as_incomplete() {
        let mut rt = runtime(&[
            r#"{"steps": ["Search for something"]}"#,
            "no verdict here",
            r#"{"steps": ["Search again"]}"#,
            "still no verdict",
        ]);
        let report = Planner::default().run(&mut rt, "goal").await.unwrap();
        assert_eq!(report.iterations, 2);
        assert!(!report.reflection.complete);
        assert_eq!(report.reflection.assessment, "unable to evaluate results");
    }

    #[test]
    fn numbered_line_parsing() {
        let steps = numbered_lines("intro\n1. first step\n 2. second step\n- third\nnot a step");
        assert_eq!(steps, vec!["first step", "second step", "third"]);
    }
}
