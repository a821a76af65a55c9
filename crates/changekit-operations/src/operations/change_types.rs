use std::collections::HashMap;

use changekit_core::{
    BumpType, ChangeCategory, ChangeType, Changeset, ChangesetConfig, Release, classify_releases,
};

use crate::Result;
use crate::operations::summary::collect_summary;
use crate::traits::{InteractionProvider, OptionGroup};

/// Last answer per category title, scoped to one per-package collection
/// run. Passed explicitly through the loop so the reuse behavior is
/// testable in isolation.
pub type PreviousAnswers = HashMap<String, String>;

/// Final output of the collector pipeline.
pub struct CollectorOutput {
    pub changesets: Vec<Changeset>,
    pub split_by_bump_type: bool,
}

/// First pipeline stage: the categories the user wants to annotate with.
///
/// The stages form a type-state chain (choose categories, attach releases,
/// build changesets, collect summaries); each constructor consumes the
/// previous stage, so calling them out of order does not compile.
pub struct CategoriesChosen {
    categories: Vec<ChangeCategory>,
}

impl CategoriesChosen {
    /// Asks which categories apply. Returns `None` when change-type
    /// collection is disabled or the user selects no category; the session
    /// then proceeds with a single plain changeset.
    ///
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    pub fn choose<I: InteractionProvider>(
        interaction: &I,
        config: &ChangesetConfig,
    ) -> Result<Option<Self>> {
        if !config.ask_change_types || config.categories.is_empty() {
            return Ok(None);
        }

        let group = OptionGroup::new(
            "change categories",
            config.categories.iter().map(format_category).collect(),
        );
        let chosen =
            interaction.multi_select("Which kinds of change does this include?", &[group])?;

        if chosen.is_empty() {
            return Ok(None);
        }

        let categories = config
            .categories
            .iter()
            .filter(|c| chosen.contains(&format_category(c)))
            .cloned()
            .collect();
        Ok(Some(Self { categories }))
    }

    #[must_use]
    pub fn attach_releases(self, releases: Vec<Release>) -> ReleasesAttached {
        ReleasesAttached {
            categories: self.categories,
            releases,
        }
    }
}

pub struct ReleasesAttached {
    categories: Vec<ChangeCategory>,
    releases: Vec<Release>,
}

impl ReleasesAttached {
    /// Collects descriptions, either shared per bump type (one changeset
    /// holding every release, rendered split) or individually per package
    /// (one changeset per package, with the answer-reuse shortcut).
    ///
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    pub fn build<I: InteractionProvider>(self, interaction: &I) -> Result<ChangesetsBuilt> {
        let shared = interaction.confirm(
            "Do you want to use the same message for all packages with the same bump type?",
        )?;

        if shared {
            self.build_per_bump_type(interaction)
        } else {
            self.build_per_package(interaction)
        }
    }

    fn build_per_bump_type<I: InteractionProvider>(
        self,
        interaction: &I,
    ) -> Result<ChangesetsBuilt> {
        let buckets = classify_releases(&self.releases);
        let mut group_answers: HashMap<BumpType, Vec<ChangeType>> = HashMap::new();

        for (bump, _) in buckets.non_empty() {
            let mut change_types = Vec::with_capacity(self.categories.len());
            for category in &self.categories {
                let question = format!(
                    "Describe the '{}' changes for the {bump} bumps",
                    category.title
                );
                let description = interaction.input(&question)?;
                change_types.push(ChangeType {
                    category: category.title.clone(),
                    description,
                });
            }
            group_answers.insert(bump, change_types);
        }

        let releases = self
            .releases
            .into_iter()
            .map(|release| {
                let change_types = group_answers
                    .get(&release.bump_type)
                    .cloned()
                    .unwrap_or_default();
                release.with_change_types(change_types)
            })
            .collect();

        Ok(ChangesetsBuilt {
            changesets: vec![Changeset::new(releases)],
            split_by_bump_type: true,
        })
    }

    fn build_per_package<I: InteractionProvider>(self, interaction: &I) -> Result<ChangesetsBuilt> {
        let mut previous_answers = PreviousAnswers::new();
        let mut changesets = Vec::with_capacity(self.releases.len());

        for release in self.releases {
            let change_types = collect_for_release(
                interaction,
                &self.categories,
                &release,
                &mut previous_answers,
            )?;
            changesets.push(Changeset::new(vec![
                release.with_change_types(change_types),
            ]));
        }

        Ok(ChangesetsBuilt {
            changesets,
            split_by_bump_type: false,
        })
    }
}

pub struct ChangesetsBuilt {
    changesets: Vec<Changeset>,
    split_by_bump_type: bool,
}

impl ChangesetsBuilt {
    /// Runs the summary collector over every built changeset.
    ///
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    pub fn collect_summaries<I: InteractionProvider>(
        mut self,
        interaction: &I,
        config: &ChangesetConfig,
    ) -> Result<CollectorOutput> {
        for changeset in &mut self.changesets {
            collect_summary(interaction, config, changeset)?;
        }

        Ok(CollectorOutput {
            changesets: self.changesets,
            split_by_bump_type: self.split_by_bump_type,
        })
    }
}

/// One description per chosen category for a single release. A category
/// answered for an earlier package is offered for reuse first; a fresh
/// answer overwrites the cache entry.
fn collect_for_release<I: InteractionProvider>(
    interaction: &I,
    categories: &[ChangeCategory],
    release: &Release,
    previous_answers: &mut PreviousAnswers,
) -> Result<Vec<ChangeType>> {
    let mut change_types = Vec::with_capacity(categories.len());

    for category in categories {
        let reused = match previous_answers.get(&category.title) {
            Some(previous) => {
                let question = format!(
                    "Use the same '{}' message as before for '{}'? (\"{previous}\")",
                    category.title, release.name
                );
                interaction.confirm(&question)?.then(|| previous.clone())
            }
            None => None,
        };

        let description = match reused {
            Some(description) => description,
            None => {
                let question = format!(
                    "Describe the '{}' change for '{}'",
                    category.title, release.name
                );
                let answer = interaction.input(&question)?;
                previous_answers.insert(category.title.clone(), answer.clone());
                answer
            }
        };

        change_types.push(ChangeType {
            category: category.title.clone(),
            description,
        });
    }

    Ok(change_types)
}

fn format_category(category: &ChangeCategory) -> String {
    if category.description.is_empty() {
        category.title.clone()
    } else {
        format!("{} - {}", category.title, category.description)
    }
}
