//! Reviewer classification and reviewer backfill.
//!
//! Approvals are overloaded: they record both votes and the accounts that
//! should be CCed on a change. To keep a reviewer attached to a change there
//! must be an approval on the patch set for that reviewer, even before they
//! vote. A zero-score approval on any label marks that "no score" case.

use crate::db::approvals;
use crate::error::AppError;
use crate::models::{
    AccountId, Change, ChangeId, LabelTypes, PatchSet, PatchSetApproval, PatchSetApprovalKey,
    PatchSetId, PatchSetInfo,
};
use serde::Serialize;
use sqlx::SqliteConnection;
use std::collections::HashSet;

/// How an account participates in a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewerState {
    /// Has voted with a non-zero score.
    Reviewer,
    /// Only has placeholder approvals.
    Cc,
}

/// Accounts on a change keyed by state.
///
/// Each account appears under exactly one state. Within a state accounts keep
/// the order in which they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewerSet {
    reviewers: Vec<AccountId>,
    cc: Vec<AccountId>,
}

impl ReviewerSet {
    pub fn get(&self, state: ReviewerState) -> &[AccountId] {
        match state {
            ReviewerState::Reviewer => &self.reviewers,
            ReviewerState::Cc => &self.cc,
        }
    }

    pub fn state_of(&self, account: AccountId) -> Option<ReviewerState> {
        if self.reviewers.contains(&account) {
            Some(ReviewerState::Reviewer)
        } else if self.cc.contains(&account) {
            Some(ReviewerState::Cc)
        } else {
            None
        }
    }

    /// Every account, reviewers first.
    pub fn all(&self) -> impl Iterator<Item = AccountId> + '_ {
        self.reviewers.iter().chain(self.cc.iter()).copied()
    }

    pub fn len(&self) -> usize {
        self.reviewers.len() + self.cc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviewers.is_empty() && self.cc.is_empty()
    }

    fn mark_reviewer(&mut self, account: AccountId) {
        if !self.reviewers.contains(&account) {
            self.reviewers.push(account);
        }
        self.cc.retain(|a| *a != account);
    }

    fn mark_cc(&mut self, account: AccountId) {
        if !self.reviewers.contains(&account) && !self.cc.contains(&account) {
            self.cc.push(account);
        }
    }
}

/// Classify the accounts behind a set of approvals.
///
/// All approvals must belong to the same change. Mixing changes is an
/// [`AppError::InvalidInput`] and no partial result is returned.
pub fn get_reviewers<'a, I>(all_approvals: I) -> Result<ReviewerSet, AppError>
where
    I: IntoIterator<Item = &'a PatchSetApproval>,
{
    let mut first: Option<&PatchSetApproval> = None;
    let mut reviewers = ReviewerSet::default();

    for psa in all_approvals {
        if let Some(f) = first {
            if f.change_id() != psa.change_id() {
                return Err(AppError::invalid_input_field(
                    format!("multiple change IDs: {}, {}", f.key, psa.key),
                    "approvals",
                ));
            }
        } else {
            first = Some(psa);
        }

        if psa.value != 0 {
            reviewers.mark_reviewer(psa.account_id());
        } else {
            reviewers.mark_cc(psa.account_id());
        }
    }

    Ok(reviewers)
}

/// Classify every account with an approval on any patch set of a change.
pub async fn get_reviewers_for_change(
    conn: &mut SqliteConnection,
    change_id: ChangeId,
) -> Result<ReviewerSet, AppError> {
    let all = approvals::by_change(conn, change_id).await?;
    get_reviewers(&all)
}

/// Ensure reviewers, the author and the committer of a new patch set have an
/// approval on it.
///
/// Author and committer are skipped when the patch set is a draft.
/// Returns the placeholders that were inserted.
pub async fn add_reviewers_for_patch_set<I>(
    conn: &mut SqliteConnection,
    label_types: &LabelTypes,
    change: &Change,
    patch_set: &PatchSet,
    info: &PatchSetInfo,
    want_reviewers: I,
    existing_reviewers: &HashSet<AccountId>,
) -> Result<Vec<PatchSetApproval>, AppError>
where
    I: IntoIterator<Item = AccountId>,
{
    let candidates = Backfill {
        change,
        patch_set_id: patch_set.id,
        is_draft: patch_set.draft,
        author: info.author,
        committer: info.committer,
    };
    candidates
        .insert(conn, label_types, want_reviewers, existing_reviewers)
        .await
}

/// Ensure the given accounts have an approval on the change's current patch
/// set.
///
/// Accounts that already hold any approval on that patch set are left alone.
pub async fn add_reviewers<I>(
    conn: &mut SqliteConnection,
    label_types: &LabelTypes,
    change: &Change,
    want_reviewers: I,
) -> Result<Vec<PatchSetApproval>, AppError>
where
    I: IntoIterator<Item = AccountId>,
{
    let patch_set_id = change.current_patch_set_id();
    let existing: HashSet<AccountId> = approvals::by_patch_set(conn, patch_set_id)
        .await?
        .iter()
        .map(PatchSetApproval::account_id)
        .collect();

    let candidates = Backfill {
        change,
        patch_set_id,
        is_draft: false,
        author: None,
        committer: None,
    };
    candidates
        .insert(conn, label_types, want_reviewers, &existing)
        .await
}

/// Inputs shared by both backfill entry points.
struct Backfill<'a> {
    change: &'a Change,
    patch_set_id: PatchSetId,
    is_draft: bool,
    author: Option<AccountId>,
    committer: Option<AccountId>,
}

impl Backfill<'_> {
    /// Accounts that still need a placeholder, in request order.
    fn needed<I>(&self, want_reviewers: I, existing: &HashSet<AccountId>) -> Vec<AccountId>
    where
        I: IntoIterator<Item = AccountId>,
    {
        let mut need: Vec<AccountId> = Vec::new();
        let mut push = |account: AccountId| {
            if !need.contains(&account) {
                need.push(account);
            }
        };

        want_reviewers.into_iter().for_each(&mut push);
        if !self.is_draft {
            self.author.into_iter().for_each(&mut push);
            self.committer.into_iter().for_each(&mut push);
        }

        need.retain(|a| *a != self.change.owner && !existing.contains(a));
        need
    }

    async fn insert<I>(
        &self,
        conn: &mut SqliteConnection,
        label_types: &LabelTypes,
        want_reviewers: I,
        existing: &HashSet<AccountId>,
    ) -> Result<Vec<PatchSetApproval>, AppError>
    where
        I: IntoIterator<Item = AccountId>,
    {
        let Some(label) = label_types.lowest_priority() else {
            return Ok(Vec::new());
        };

        let need = self.needed(want_reviewers, existing);
        if need.is_empty() {
            return Ok(Vec::new());
        }

        let granted = chrono::Utc::now().timestamp();
        let cells: Vec<PatchSetApproval> = need
            .into_iter()
            .map(|account_id| {
                PatchSetApproval::new(
                    PatchSetApprovalKey {
                        patch_set_id: self.patch_set_id,
                        account_id,
                        label_id: label.label_id().clone(),
                    },
                    0,
                    granted,
                )
            })
            .collect();

        approvals::insert(conn, &cells).await?;
        log::debug!(
            "Added {} reviewer placeholder(s) on patch set {} under {}",
            cells.len(),
            self.patch_set_id,
            label.label_id()
        );

        Ok(cells)
    }
}
