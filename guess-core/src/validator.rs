use guess_types::{Airport, Message, Rules};

/// Check a guess for completeness against the active rules.
///
/// Returns `None` when the guess is valid. When both required airports are
/// missing the combined message wins over either single-axis message. Pure:
/// no network, no location access.
pub fn validate_guess(
    rules: &Rules,
    origin: Option<&Airport>,
    destination: Option<&Airport>,
) -> Option<Message> {
    let origin_missing = rules.use_origin && origin.is_none();
    let destination_missing = rules.use_destination && destination.is_none();

    if origin_missing && destination_missing {
        Some(Message::new(
            "Neither of the airports were provided",
            "To make a guess, provide guesses for the origin and destination airports.",
        ))
    } else if origin_missing {
        Some(Message::new(
            "An origin airport was not provided",
            "To make a guess, either provide an origin airport or disable origin guesses from the settings menu.",
        ))
    } else if destination_missing {
        Some(Message::new(
            "A destination airport was not provided",
            "To make a guess, either provide a destination airport or disable destination guesses from the settings menu.",
        ))
    } else {
        None
    }
}
