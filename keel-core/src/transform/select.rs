//! Container selection

use crate::domain::task_definition::ContainerDefinition;
use crate::error::DeployError;

/// How the target container is picked out of a task definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// First container that has a non-empty name
    FirstNamed,
    /// First container regardless of name, for single-container tasks
    SoleContainer,
}

/// Result of a container selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Position of the selected container in the definitions list
    pub index: usize,
    /// Name of the selected container, if it has one
    pub name: Option<String>,
    /// Every non-empty container name, in definition order
    pub all_names: Vec<String>,
}

/// Picks the container to update according to `policy`
///
/// Fails with [`DeployError::NoContainerFound`] when no container qualifies.
pub fn select_container(
    definitions: &[ContainerDefinition],
    policy: SelectionPolicy,
) -> Result<Selection, DeployError> {
    let all_names = definitions
        .iter()
        .filter_map(|def| def.named())
        .map(str::to_string)
        .collect();

    let index = match policy {
        SelectionPolicy::FirstNamed => definitions.iter().position(|def| def.named().is_some()),
        SelectionPolicy::SoleContainer => (!definitions.is_empty()).then_some(0),
    }
    .ok_or(DeployError::NoContainerFound)?;

    Ok(Selection {
        index,
        name: definitions[index].named().map(str::to_string),
        all_names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unnamed(image: &str) -> ContainerDefinition {
        ContainerDefinition {
            image: Some(image.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_named_skips_unnamed_containers() {
        let defs = vec![
            unnamed("busybox"),
            ContainerDefinition {
                name: Some(String::new()),
                ..Default::default()
            },
            ContainerDefinition::new("web", "nginx"),
            ContainerDefinition::new("sidecar", "envoy"),
        ];

        let selection = select_container(&defs, SelectionPolicy::FirstNamed).unwrap();
        assert_eq!(selection.index, 2);
        assert_eq!(selection.name.as_deref(), Some("web"));
        assert_eq!(selection.all_names, vec!["web", "sidecar"]);
    }

    #[test]
    fn test_first_named_fails_without_names() {
        let defs = vec![unnamed("a"), unnamed("b")];
        assert_eq!(
            select_container(&defs, SelectionPolicy::FirstNamed),
            Err(DeployError::NoContainerFound)
        );
    }

    #[test]
    fn test_empty_definitions_fail_for_both_policies() {
        for policy in [SelectionPolicy::FirstNamed, SelectionPolicy::SoleContainer] {
            assert_eq!(
                select_container(&[], policy),
                Err(DeployError::NoContainerFound)
            );
        }
    }

    #[test]
    fn test_sole_container_takes_first_even_without_name() {
        let defs = vec![unnamed("app"), ContainerDefinition::new("web", "nginx")];

        let selection = select_container(&defs, SelectionPolicy::SoleContainer).unwrap();
        assert_eq!(selection.index, 0);
        assert_eq!(selection.name, None);
        assert_eq!(selection.all_names, vec!["web"]);
    }
}
