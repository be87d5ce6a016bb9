use crate::Result;
use crate::synth::CreateCommand;

/// Render the commands as a JSON array of `{ name, kind, argv }` objects.
pub fn render_json(commands: &[CreateCommand]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(commands)?;
    json.push('\n');
    Ok(json)
}
