use std::io::Write;
use std::sync::Arc;

use crate::errors::ApiError;
use crate::models::{Conversation, Message};
use crate::services::prompt::Prompter;
use crate::services::ChatCompletion;
use crate::ui;

pub const QUIT_SENTINEL: &str = "quit";
pub const ANALYSIS_REQUEST_PREFIX: &str = "Analyze this food log and provide insights: ";

// Consecutive stdin failures tolerated before the loop gives up.
const MAX_READ_FAILURES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Init,
    FirstAnalysis,
    Idle,
    AwaitingReply,
    Terminated,
}

/// Owns the chat history for one run and drives the analyse-then-chat loop.
pub struct ConversationHandler {
    client: Arc<dyn ChatCompletion>,
    model: String,
    conversation: Conversation,
    state: LoopState,
    read_failures: u32,
}

impl ConversationHandler {
    /// Seeds the history with the system instruction (if any) and the food log
    /// analysis request.
    pub fn new(
        client: Arc<dyn ChatCompletion>,
        model: String,
        system_prompt: Option<&str>,
        food_log: &str,
    ) -> Self {
        let mut conversation = Conversation::new();
        if let Some(prompt) = system_prompt {
            conversation.push(Message::system(prompt));
        }
        conversation.push(Message::user(format!("{}{}", ANALYSIS_REQUEST_PREFIX, food_log)));

        Self {
            client,
            model,
            conversation,
            state: LoopState::Init,
            read_failures: 0,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// The mandatory first call. A failure here ends the run.
    pub async fn first_analysis<W: Write>(&mut self, out: &mut W) -> Result<(), ApiError> {
        self.state = LoopState::FirstAnalysis;
        log::info!("🥗 Requesting food log analysis");

        match self.client.complete(&self.model, self.conversation.messages()).await {
            Ok(reply) => {
                if let Err(e) = ui::render_reply(out, &reply) {
                    log::warn!("⚠️ Could not print reply: {}", e);
                }
                self.conversation.push(Message::assistant(reply));
                self.state = LoopState::Idle;
                Ok(())
            }
            Err(e) => {
                self.state = LoopState::Terminated;
                Err(e)
            }
        }
    }

    /// Handles one line of input from `Idle`. Returns the state reached.
    ///
    /// Only `quit` or the end of input leave the loop; read, request and print
    /// failures are reported and the handler goes back to `Idle`. A failed
    /// reply leaves the user's message in the history with no assistant
    /// answer after it; the next turn is sent as-is.
    pub async fn step<W: Write>(&mut self, prompter: &mut dyn Prompter, out: &mut W) -> LoopState {
        if self.state != LoopState::Idle {
            return self.state;
        }

        let input = match prompter.read_visible(ui::FOLLOW_UP_PROMPT) {
            Ok(Some(line)) => {
                self.read_failures = 0;
                line
            }
            Ok(None) => {
                log::info!("Input closed, ending conversation");
                self.state = LoopState::Terminated;
                return self.state;
            }
            Err(e) => {
                self.read_failures += 1;
                log::warn!("⚠️ Could not read input ({} in a row): {}", self.read_failures, e);
                report(out, "Could not read input", &e);
                if self.read_failures >= MAX_READ_FAILURES {
                    log::error!("❌ Giving up on input after {} failed reads", self.read_failures);
                    self.state = LoopState::Terminated;
                }
                return self.state;
            }
        };

        let input = input.trim();
        if input == QUIT_SENTINEL {
            self.state = LoopState::Terminated;
            return self.state;
        }
        if input.is_empty() {
            return self.state;
        }

        self.conversation.push(Message::user(input));
        self.state = LoopState::AwaitingReply;

        match self.client.complete(&self.model, self.conversation.messages()).await {
            Ok(reply) => {
                self.conversation.push(Message::assistant(reply));
                if let Some(reply) = self.conversation.last() {
                    if let Err(e) = ui::render_reply(out, &reply.content) {
                        log::warn!("⚠️ Could not print reply: {}", e);
                    }
                }
            }
            Err(e) => {
                log::warn!("⚠️ Follow-up request failed: {}", e);
                report(out, "Error sending request to API", &e);
            }
        }

        self.state = LoopState::Idle;
        self.state
    }

    /// Reads and answers follow-up questions until `quit` or end of input.
    pub async fn run<W: Write>(&mut self, prompter: &mut dyn Prompter, out: &mut W) {
        while self.step(prompter, out).await != LoopState::Terminated {}
        log::info!("👋 Conversation ended after {} messages", self.conversation.len());
    }
}

fn report<W: Write>(out: &mut W, context: &str, err: &dyn std::fmt::Display) {
    if let Err(e) = ui::render_error(out, context, err) {
        log::warn!("⚠️ Could not print error: {}", e);
    }
}
