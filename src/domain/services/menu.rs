use crate::domain::models::event::Menu;
use crate::error::AppError;

/// Checks a submitted triple against the menu's current contents. Pure
/// membership test per group: exact, case-sensitive string match, no
/// trimming. Failures enumerate the offending field names.
pub fn validate_selection(
    menu: &Menu,
    dinner: &str,
    activity: &str,
    mood: &str,
) -> Result<(), AppError> {
    let mut failed = Vec::new();

    if !menu.dinner.iter().any(|o| o == dinner) {
        failed.push("dinnerChoice".to_string());
    }
    if !menu.activity.iter().any(|o| o == activity) {
        failed.push("activityChoice".to_string());
    }
    if !menu.mood.iter().any(|o| o == mood) {
        failed.push("moodChoice".to_string());
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(AppError::InvalidSelection(failed))
    }
}
