//! Summary prompt template.

/// Instruction placed before the transcript.
const PREAMBLE: &str = "Below is a SSH session transcript to production infrastructure.
Please analyze this terminal session output and provide a concise summary of what was done.
If anything security-critical was done or this might be someone trying to exploit or exfiltrate data, mention it.
Do not include any sensitive data such as API keys, passwords, tokens or other credentials in the response, even if they appear in the transcript.
The summary can use bullet points or a numbered list, but should be a maximum of 10 sentences.";

/// Cue placed after the transcript.
const CUE: &str = "Summary of this SSH session:";

/// Embed a cleaned transcript in the summary instructions.
pub fn build_prompt(transcript: &str) -> String {
    format!("{}\n\n{}\n\n{}", PREAMBLE, transcript, CUE)
}
