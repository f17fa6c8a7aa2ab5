//! Fixed command texts
//!
//! The same 65 command titles apply to every language; only the audio differs.

use crate::types::{Category, TrackNumber};
use serde::Serialize;

/// Command texts indexed by `track - 1`
pub const COMMANDS: [&str; 65] = [
    "This is Indian Naval Warship",
    "What is your last port of call",
    "What is your next port of call and date of arrival",
    "What is your international call sign",
    "What is flag of your vessel",
    "What is name and nationality of your master",
    "Indicate the number and nationality of crew and passenger on-board",
    "Turn on your Radio and speak to us on Channel 16",
    "What is the purpose of your Voyage",
    "Do you have permission to enter this area",
    "Answer my questions \"Yes\" or \"No\"",
    "Do you require help",
    "What is your \"GPS\" position",
    "In case your Radio is not working, wave your flag",
    "Do you have machinery breakdown",
    "Thank you for Co-operation Bon Voyage",
    "Can you hear us? If Yes wave your hands",
    "What is your cargo",
    "Indicate number of women and children on-board",
    "What is your Gross/Net tonnage and endurance of your ship",
    "Be prepared to receive Indian Naval Boarding Party",
    "Medical help is on the way",
    "Hello! Do you understand English",
    "Which language do you speak",
    "I do not understand your language",
    "What is your country",
    "What port or country did you began your voyage",
    "This is Indian Navy",
    "This is Indian Coast Guard",
    "This is Indian Police",
    "Stop your vessel",
    "Do not panic. This is a routine inspection",
    "Prepare to be boarded. Lower your pilot ladder",
    "Alter your course to --- speed ---",
    "You are in a firing area, inform other boats also",
    "Be ready for inspection",
    "Anchor the ship and come up on Radio Channel 16",
    "Do you have any explosives or weapons on-board",
    "Open up your containers to speed up search",
    "Are there any empty containers on-board",
    "Does anybody require any medical help",
    "Turn on lights and be ready for inspection",
    "Show us the crew and cargo manifest",
    "Do you have any hazardous material",
    "Indicate the number of personnel on watch and their location",
    "Bring all people on the deck",
    "Do you have any permit to enter this area",
    "Show us the port clearance papers",
    "Is it a fuel Cargo",
    "This is a Warning! Stop your vessel or we will fire on you",
    "Stop your vessel and assemble all your crew on the foxle",
    "We will now fire on your vessel",
    "You are in Indian territorial waters, alter course and clear away",
    "Your vessel is detained for search",
    "Your vessel is liable for search",
    "Stop your vessel! You are entering the Indian Territorial Waters",
    "This is the Final Warning! Stop your Vessel and Co-operate with us",
    "You are too close to my ship. Move Back",
    "Switch on your upper deck lights",
    "Do not close me. Alter course to starboard",
    "Do not approach my ship closer than 500 feet",
    "Stop! You will be shot",
    "Stop! This is a restricted zone",
    "Warning! Keep your hands behind your head and co-operate! It's a routine checkup",
    "Turn off your engine and surrender",
];

/// A command as listed on the category screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    pub track: TrackNumber,
    pub category: Category,
    pub text: &'static str,
}

/// Title of a track's command
pub fn command_title(track: TrackNumber) -> &'static str {
    COMMANDS[(track.get() - 1) as usize]
}

/// Commands in a category, in track order
pub fn commands_for(category: Category) -> Vec<Command> {
    category
        .tracks()
        .map(|track| Command {
            track,
            category,
            text: command_title(track),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_per_category() {
        assert_eq!(commands_for(Category::Introduction).len(), 30);
        assert_eq!(commands_for(Category::Caution).len(), 19);
        assert_eq!(commands_for(Category::Warning).len(), 16);
    }

    #[test]
    fn test_command_title_lookup() -> Result<(), crate::AppError> {
        assert_eq!(command_title(TrackNumber::new(31)?), "Stop your vessel");
        assert_eq!(
            command_title(TrackNumber::new(65)?),
            "Turn off your engine and surrender"
        );
        Ok(())
    }

    #[test]
    fn test_warning_commands_start_at_fifty() {
        let warnings = commands_for(Category::Warning);
        assert_eq!(warnings.first().map(|c| c.track.get()), Some(50));
        assert!(warnings.iter().all(|c| c.category == Category::Warning));
    }
}
