//! Carry label scores forward from one patch set to the next.

use crate::db::approvals;
use crate::error::AppError;
use crate::models::{ChangeKind, LabelType, LabelTypes, PatchSet, PatchSetApproval, PatchSetId};
use sqlx::SqliteConnection;

/// Label rule that allowed a score to be carried forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPolicy {
    MinScore,
    MaxScore,
    TrivialRebase,
    NoCodeChange,
}

/// The rule under which `label` lets `approval` survive into a patch set of
/// kind `kind`.
///
/// Rules are checked in declaration order of [`CopyPolicy`]; the first match
/// wins.
pub fn copy_policy(
    label: &LabelType,
    approval: &PatchSetApproval,
    kind: ChangeKind,
) -> Option<CopyPolicy> {
    if label.copy_min_score && label.is_max_negative(approval) {
        Some(CopyPolicy::MinScore)
    } else if label.copy_max_score && label.is_max_positive(approval) {
        Some(CopyPolicy::MaxScore)
    } else if label.copy_all_scores_on_trivial_rebase && kind == ChangeKind::TrivialRebase {
        Some(CopyPolicy::TrivialRebase)
    } else if label.copy_all_scores_if_no_code_change && kind == ChangeKind::NoCodeChange {
        Some(CopyPolicy::NoCodeChange)
    } else {
        None
    }
}

/// Copy eligible scores on patch set `source` to `dest`.
///
/// Approvals on other patch sets and approvals on labels missing from
/// `label_types` are ignored. Returns the inserted copies.
pub async fn copy_labels_from<'a, I>(
    conn: &mut SqliteConnection,
    label_types: &LabelTypes,
    source_approvals: I,
    source: PatchSetId,
    dest: &PatchSet,
    kind: ChangeKind,
) -> Result<Vec<PatchSetApproval>, AppError>
where
    I: IntoIterator<Item = &'a PatchSetApproval>,
{
    let mut copied = Vec::new();
    for a in source_approvals {
        if a.patch_set_id() != source {
            continue;
        }
        let Some(label) = label_types.by_label(a.label_id()) else {
            log::trace!("Label {} is not configured, not copying {}", a.label_id(), a.key);
            continue;
        };
        if let Some(policy) = copy_policy(label, a, kind) {
            log::trace!("Copying {} under {:?}", a.key, policy);
            copied.push(PatchSetApproval::copy_to(dest.id, a));
        }
    }

    approvals::insert(conn, &copied).await?;
    log::debug!(
        "Copied {} approval(s) from patch set {} to {} ({})",
        copied.len(),
        source,
        dest.id,
        kind
    );

    Ok(copied)
}

/// Copy eligible scores from the stored approvals of `source` to `dest`.
pub async fn copy_labels(
    conn: &mut SqliteConnection,
    label_types: &LabelTypes,
    source: PatchSetId,
    dest: &PatchSet,
    kind: ChangeKind,
) -> Result<Vec<PatchSetApproval>, AppError> {
    let source_approvals = approvals::by_patch_set(conn, source).await?;
    copy_labels_from(conn, label_types, &source_approvals, source, dest, kind).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::models::{AccountId, ChangeId, LabelId, LabelValue, PatchSetApprovalKey};

    const CHANGE: ChangeId = ChangeId(9);

    fn label(name: &str) -> LabelType {
        LabelType::new(
            name,
            vec![
                LabelValue::new(-2, "Veto"),
                LabelValue::new(-1, "Dislike"),
                LabelValue::new(0, "No score"),
                LabelValue::new(1, "Like"),
                LabelValue::new(2, "Approve"),
            ],
        )
    }

    fn vote(ps: i32, account: i64, label: &str, value: i16) -> PatchSetApproval {
        PatchSetApproval::new(
            PatchSetApprovalKey {
                patch_set_id: PatchSetId::new(CHANGE, ps),
                account_id: AccountId(account),
                label_id: LabelId::new(label),
            },
            value,
            1_600_000_000,
        )
    }

    fn dest() -> PatchSet {
        PatchSet {
            id: PatchSetId::new(CHANGE, 2),
            draft: false,
        }
    }

    #[test]
    fn test_single_policies() {
        let mut l = label("Code-Review");
        l.copy_min_score = true;

        let veto = vote(1, 1, "Code-Review", -2);
        let like = vote(1, 1, "Code-Review", 1);
        let approve = vote(1, 1, "Code-Review", 2);

        assert_eq!(copy_policy(&l, &veto, ChangeKind::Rework), Some(CopyPolicy::MinScore));
        assert_eq!(copy_policy(&l, &vote(1, 1, "Code-Review", -1), ChangeKind::Rework), None);
        assert_eq!(copy_policy(&l, &approve, ChangeKind::Rework), None);

        l.copy_max_score = true;
        assert_eq!(copy_policy(&l, &approve, ChangeKind::Rework), Some(CopyPolicy::MaxScore));

        l.copy_all_scores_on_trivial_rebase = true;
        assert_eq!(
            copy_policy(&l, &like, ChangeKind::TrivialRebase),
            Some(CopyPolicy::TrivialRebase)
        );
        assert_eq!(copy_policy(&l, &like, ChangeKind::NoCodeChange), None);

        l.copy_all_scores_if_no_code_change = true;
        assert_eq!(
            copy_policy(&l, &like, ChangeKind::NoCodeChange),
            Some(CopyPolicy::NoCodeChange)
        );
        assert_eq!(copy_policy(&l, &like, ChangeKind::Rework), None);
    }

    #[test]
    fn test_first_matching_policy_wins() {
        let mut l = label("Code-Review");
        l.copy_min_score = true;
        l.copy_max_score = true;
        l.copy_all_scores_on_trivial_rebase = true;
        l.copy_all_scores_if_no_code_change = true;

        let veto = vote(1, 1, "Code-Review", -2);
        let approve = vote(1, 1, "Code-Review", 2);
        let dislike = vote(1, 1, "Code-Review", -1);

        assert_eq!(
            copy_policy(&l, &veto, ChangeKind::TrivialRebase),
            Some(CopyPolicy::MinScore)
        );
        assert_eq!(
            copy_policy(&l, &approve, ChangeKind::NoCodeChange),
            Some(CopyPolicy::MaxScore)
        );
        assert_eq!(
            copy_policy(&l, &dislike, ChangeKind::TrivialRebase),
            Some(CopyPolicy::TrivialRebase)
        );
    }

    #[tokio::test]
    async fn test_each_approval_copied_once() {
        let dir = tempfile::tempdir().unwrap();
        let pool = crate::db::initialize(&dir.path().join("test.db"), &DatabaseConfig::default())
            .await
            .unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let mut l = label("Code-Review");
        l.copy_min_score = true;
        l.copy_all_scores_on_trivial_rebase = true;
        let types = LabelTypes::new(vec![l]);

        let input = vec![vote(1, 1, "Code-Review", -2)];
        let copied = copy_labels_from(
            &mut conn,
            &types,
            &input,
            PatchSetId::new(CHANGE, 1),
            &dest(),
            ChangeKind::TrivialRebase,
        )
        .await
        .unwrap();
        assert_eq!(copied.len(), 1);
    }

    #[tokio::test]
    async fn test_copy_labels_from_filters_source_and_unknown_labels() {
        let dir = tempfile::tempdir().unwrap();
        let pool = crate::db::initialize(&dir.path().join("test.db"), &DatabaseConfig::default())
            .await
            .unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let mut review = label("Code-Review");
        review.copy_min_score = true;
        review.copy_max_score = true;
        let types = LabelTypes::new(vec![review]);

        let source = PatchSetId::new(CHANGE, 1);
        let input = vec![
            vote(1, 1, "Code-Review", -2),
            vote(1, 2, "Code-Review", 1),
            vote(1, 3, "Code-Review", 2),
            vote(1, 4, "Library-Compliance", -2),
            // belongs to another patch set
            vote(3, 5, "Code-Review", 2),
        ];

        let copied = copy_labels_from(&mut conn, &types, &input, source, &dest(), ChangeKind::Rework)
            .await
            .unwrap();

        let accounts: Vec<i64> = copied.iter().map(|a| a.account_id().0).collect();
        assert_eq!(accounts, vec![1, 3]);
        assert!(copied.iter().all(|a| a.patch_set_id() == dest().id));
        assert!(copied
            .iter()
            .all(|a| types.by_label(a.label_id()).is_some()));

        let stored = approvals::by_patch_set(&mut conn, dest().id).await.unwrap();
        assert_eq!(stored, copied);
    }

    #[tokio::test]
    async fn test_copy_labels_reads_source_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let pool = crate::db::initialize(&dir.path().join("test.db"), &DatabaseConfig::default())
            .await
            .unwrap();
        let mut conn = pool.acquire().await.unwrap();

        let mut verified = label("Verified");
        verified.copy_all_scores_if_no_code_change = true;
        let types = LabelTypes::new(vec![verified, label("Code-Review")]);

        approvals::insert(
            &mut conn,
            &[
                vote(1, 1, "Verified", 1),
                vote(1, 1, "Code-Review", 2),
                vote(1, 2, "Verified", 0),
            ],
        )
        .await
        .unwrap();

        let source = PatchSetId::new(CHANGE, 1);
        let rework = copy_labels(&mut conn, &types, source, &dest(), ChangeKind::Rework)
            .await
            .unwrap();
        assert!(rework.is_empty());

        let no_code = copy_labels(&mut conn, &types, source, &dest(), ChangeKind::NoCodeChange)
            .await
            .unwrap();
        assert_eq!(no_code.len(), 2);
        assert!(no_code
            .iter()
            .all(|a| a.label_id() == &LabelId::new("Verified")));
        assert_eq!(no_code[0].granted, 1_600_000_000);
    }
}
