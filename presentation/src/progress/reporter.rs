//! Progress reporting for analysis runs

use align_application::ports::progress::{AnalysisPhase, ProgressNotifier};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress during analysis with a live spinner per phase
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap()
    }

    fn phase_display_name(phase: &AnalysisPhase) -> &'static str {
        match phase {
            AnalysisPhase::Embedding => "Embedding responses",
            AnalysisPhase::Similarity => "Scoring similarity",
            AnalysisPhase::ConflictAnalysis => "Analyzing disagreement",
            AnalysisPhase::Consensus => "Synthesizing consensus",
            AnalysisPhase::Questions => "Generating questions",
            AnalysisPhase::Document => "Drafting document",
        }
    }

    fn phase_short_name(phase: &AnalysisPhase) -> &'static str {
        match phase {
            AnalysisPhase::Embedding => "Embedding",
            AnalysisPhase::Similarity => "Similarity scan",
            AnalysisPhase::ConflictAnalysis => "Conflict analysis",
            AnalysisPhase::Consensus => "Consensus",
            AnalysisPhase::Questions => "Question generation",
            AnalysisPhase::Document => "Document",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &AnalysisPhase) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::phase_display_name(phase).to_string());
        pb.set_message("...");
        pb.enable_steady_tick(Duration::from_millis(100));

        *self.spinner.lock().unwrap() = Some(pb);
    }

    fn on_phase_complete(&self, phase: &AnalysisPhase) {
        if let Some(pb) = self.spinner.lock().unwrap().take() {
            let phase_name = Self::phase_short_name(phase);
            pb.finish_with_message(format!("{} complete!", phase_name.green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &AnalysisPhase) {
        let phase_name = ProgressReporter::phase_display_name(phase);
        println!("{} {}", "->".cyan(), phase_name.bold());
    }

    fn on_phase_complete(&self, phase: &AnalysisPhase) {
        println!(
            "  {} {}",
            "v".green(),
            ProgressReporter::phase_short_name(phase)
        );
    }
}
