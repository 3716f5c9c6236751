//! Reference resolution
//!
//! Commands name projects and counters the way a person would type them:
//! a full id, a unique id prefix, a name, or (for counters) a 1-based
//! position in the project.

use knitrow_core::{Counter, Project};

use crate::error::CommandError;

/// Finds a project by exact id, exact name, then unique id prefix.
///
/// # Errors
///
/// Returns [`CommandError::ProjectNotFound`] when nothing matches and
/// [`CommandError::Ambiguous`] when a name or prefix matches several
/// projects.
pub fn project<'a>(projects: &'a [Project], reference: &str) -> Result<&'a Project, CommandError> {
    let reference = reference.trim();
    if let Some(found) = projects.iter().find(|p| p.id.as_str() == reference) {
        return Ok(found);
    }

    let named: Vec<&Project> = projects.iter().filter(|p| p.name == reference).collect();
    if let Some(found) = single(reference, &named, |p| p.id.short().to_string())? {
        return Ok(found);
    }

    let prefixed: Vec<&Project> = projects
        .iter()
        .filter(|p| !reference.is_empty() && p.id.as_str().starts_with(reference))
        .collect();
    single(reference, &prefixed, |p| p.id.short().to_string())?.ok_or_else(|| {
        CommandError::ProjectNotFound {
            reference: reference.to_string(),
        }
    })
}

/// Finds a counter by exact id, 1-based position, exact name, then unique
/// id prefix.
///
/// # Errors
///
/// Returns [`CommandError::CounterNotFound`] when nothing matches and
/// [`CommandError::Ambiguous`] when a name or prefix matches several
/// counters.
pub fn counter<'a>(project: &'a Project, reference: &str) -> Result<&'a Counter, CommandError> {
    let reference = reference.trim();
    let counters = &project.counters;
    if let Some(found) = counters.iter().find(|c| c.id.as_str() == reference) {
        return Ok(found);
    }

    if let Some(found) = reference
        .parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(|index| counters.get(index))
    {
        return Ok(found);
    }

    let named: Vec<&Counter> = counters.iter().filter(|c| c.name == reference).collect();
    if let Some(found) = single(reference, &named, |c| c.id.short().to_string())? {
        return Ok(found);
    }

    let prefixed: Vec<&Counter> = counters
        .iter()
        .filter(|c| !reference.is_empty() && c.id.as_str().starts_with(reference))
        .collect();
    single(reference, &prefixed, |c| c.id.short().to_string())?.ok_or_else(|| {
        CommandError::CounterNotFound {
            reference: reference.to_string(),
        }
    })
}

/// Picks the counter a row command works on: the named one, or the
/// project's active counter.
///
/// # Errors
///
/// Returns a resolution error for an unknown reference.
pub fn target<'a>(
    project: &'a Project,
    reference: Option<&str>,
) -> Result<Option<&'a Counter>, CommandError> {
    reference.map_or_else(
        || Ok(project.active_counter()),
        |reference| counter(project, reference).map(Some),
    )
}

fn single<'a, T>(
    reference: &str,
    matches: &[&'a T],
    label: impl Fn(&T) -> String,
) -> Result<Option<&'a T>, CommandError> {
    match matches {
        [] => Ok(None),
        [only] => Ok(Some(*only)),
        many => Err(CommandError::Ambiguous {
            reference: reference.to_string(),
            matches: many.iter().map(|item| label(item)).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use knitrow_core::counter::{CounterInput, Mode, create};
    use knitrow_core::{CounterId, ProjectId};

    fn project_with_id(id: &str, name: &str) -> Project {
        Project {
            id: ProjectId::from(id),
            ..Project::new(name, Utc::now())
        }
    }

    fn counter_with_id(id: &str, name: &str) -> Counter {
        let counter = create(&CounterInput::new(Mode::Constant).start_stitches(40).name(name))
            .unwrap();
        Counter {
            id: CounterId::from(id),
            ..counter
        }
    }

    fn sample() -> Project {
        project_with_id("p-0001", "Sweater")
            .add_counter(counter_with_id("aa11", "Ribbing"))
            .add_counter(counter_with_id("aa22", "Body"))
            .add_counter(counter_with_id("bb33", "Body"))
    }

    #[test]
    fn test_project_by_id_name_and_prefix() {
        let projects = vec![
            project_with_id("abc123", "Hat"),
            project_with_id("abd456", "Scarf"),
        ];
        assert_eq!(project(&projects, "abc123").unwrap().name, "Hat");
        assert_eq!(project(&projects, "Scarf").unwrap().name, "Scarf");
        assert_eq!(project(&projects, "abd").unwrap().name, "Scarf");
    }

    #[test]
    fn test_project_ambiguous_prefix() {
        let projects = vec![
            project_with_id("abc123", "Hat"),
            project_with_id("abd456", "Scarf"),
        ];
        let err = project(&projects, "ab").unwrap_err();
        assert!(matches!(err, CommandError::Ambiguous { .. }));
    }

    #[test]
    fn test_project_not_found() {
        let err = project(&[], "Hat").unwrap_err();
        assert!(matches!(err, CommandError::ProjectNotFound { .. }));
    }

    #[test]
    fn test_counter_by_position() {
        let project = sample();
        assert_eq!(counter(&project, "1").unwrap().name, "Ribbing");
        assert_eq!(counter(&project, "3").unwrap().id.as_str(), "bb33");
    }

    #[test]
    fn test_counter_by_prefix_and_name() {
        let project = sample();
        assert_eq!(counter(&project, "bb").unwrap().id.as_str(), "bb33");
        assert_eq!(counter(&project, "Ribbing").unwrap().id.as_str(), "aa11");
        assert!(matches!(
            counter(&project, "aa").unwrap_err(),
            CommandError::Ambiguous { .. }
        ));
        assert!(matches!(
            counter(&project, "Body").unwrap_err(),
            CommandError::Ambiguous { .. }
        ));
    }

    #[test]
    fn test_counter_position_out_of_range() {
        let err = counter(&sample(), "9").unwrap_err();
        assert!(matches!(err, CommandError::CounterNotFound { .. }));
    }

    #[test]
    fn test_target_defaults_to_active() {
        let project = sample();
        assert_eq!(target(&project, None).unwrap().unwrap().name, "Ribbing");
        assert_eq!(
            target(&project, Some("2")).unwrap().unwrap().id.as_str(),
            "aa22"
        );
        let empty = Project::new("Empty", Utc::now());
        assert!(target(&empty, None).unwrap().is_none());
    }
}
