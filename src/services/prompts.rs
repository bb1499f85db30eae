use crate::models::MoodPreferences;

const SKIPPED: &str = "(skipped)";

const OUTPUT_CONTRACT: &str = "For each recommendation, provide a JSON object with fields: \
\"title\" (string), \"type\" (string, e.g., \"Movie\", \"TV Show\", \"Documentary\"), \
\"release_year\" (string, e.g., \"2020\", optional), \"genres\" (array of strings, e.g., \
[\"Drama\", \"Thriller\"], optional), and \"reason\" (string explaining why this title \
matches the user's preferences or why it is recommended). Return the response as a JSON \
array of these objects.";

/// Builds the recommendation prompt for a filled-in mood questionnaire
///
/// One line per question, in questionnaire order, so the model sees skipped
/// questions explicitly instead of guessing.
pub fn build_mood_prompt(prefs: &MoodPreferences) -> String {
    let min_rating = prefs.min_rating.map(|rating| rating.to_string());
    let genres = (!prefs.genres.is_empty()).then(|| prefs.genres.join(", "));

    let answers: [(&str, Option<&str>); 11] = [
        (
            "What do you feel like watching today?",
            prefs.content_type.as_deref(),
        ),
        ("What genre(s) are you in the mood for?", genres.as_deref()),
        (
            "Describe your mood, how are you feeling right now?",
            prefs.mood.as_deref(),
        ),
        (
            "What language would you prefer?",
            prefs.language.as_deref(),
        ),
        (
            "Which country's cinema interests you?",
            prefs.country.as_deref(),
        ),
        (
            "Looking for something based on true events or real life?",
            prefs.true_events.as_deref(),
        ),
        (
            "Do you want hidden gems or popular hits?",
            prefs.popularity.as_deref(),
        ),
        (
            "What's the minimum TMDB rating you'd like?",
            min_rating.as_deref(),
        ),
        (
            "Any preferred release years? (e.g., 2010–2020)",
            prefs.release_years.as_deref(),
        ),
        ("How much time do you have?", prefs.length.as_deref()),
        ("What vibe are you going for?", prefs.tone.as_deref()),
    ];

    let mut prompt = String::from(
        "Recommend 5 movies, TV shows, or documentaries based on these preferences:\n",
    );

    for (question, answer) in answers {
        let answer = answer
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(SKIPPED);
        prompt.push_str(&format!("- {}: {}\n", question, answer));
    }

    prompt.push_str(OUTPUT_CONTRACT);
    prompt
}
