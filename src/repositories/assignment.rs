//! # Assignment Service
//!
//! Assign/return/history operations for assets. This is the one place the
//! asset's current_assignee pointer is written, and every write happens in
//! the same transaction as the matching ledger append, so the pointer and
//! the latest history entry can never disagree.
//!
//! Transfers are rejected: an assigned asset must be returned before it can
//! be assigned again. Reassigning in one step would record the transition
//! but lose the explicit return event in the provenance chain.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, Value,
};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::asset::{Column as AssetColumn, Entity as Asset, Model as AssetModel};
use crate::models::assignment_history::{
    ActiveModel as HistoryActiveModel, Column as HistoryColumn, Entity as History,
};
use crate::models::employee::{Column as EmployeeColumn, Entity as Employee};

/// Employee reference resolved for history display.
///
/// `name` is `None` when the employee record has since been deleted; the
/// ledger entry itself is immutable either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeSummary {
    pub id: Uuid,
    pub name: Option<String>,
}

/// One custody transition with assignees resolved to display summaries
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub previous_assignee: Option<AssigneeSummary>,
    pub current_assignee: Option<AssigneeSummary>,
    pub assigned_date: DateTimeWithTimeZone,
}

/// Service coordinating asset pointer updates with ledger appends
pub struct AssignmentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AssignmentService<'a> {
    /// Create a new AssignmentService with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Assign an unassigned asset to an employee.
    ///
    /// Fails with `NotFound` if the asset or employee is unknown,
    /// `InvalidState` if the asset is already assigned, and `Conflict` if a
    /// concurrent writer changed the assignment after our read. On any
    /// failure the transaction rolls back, leaving no partial ledger entry.
    pub async fn assign(
        &self,
        asset_id: Uuid,
        new_assignee_id: Uuid,
    ) -> Result<AssetModel, RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let asset = find_asset(&txn, asset_id).await?;

        let employee_exists = Employee::find_by_id(new_assignee_id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .is_some();
        if !employee_exists {
            return Err(RepositoryError::not_found("Employee not found"));
        }

        if asset.current_assignee.is_some() {
            return Err(RepositoryError::invalid_state(
                "Asset is already assigned; return it before assigning again",
            ));
        }

        let now = Utc::now();

        // Compare-and-set: only flip the pointer if it is still unassigned.
        // Zero rows affected means a concurrent assign won the race.
        let update = Asset::update_many()
            .col_expr(AssetColumn::CurrentAssignee, Expr::value(new_assignee_id))
            .col_expr(AssetColumn::UpdatedAt, Expr::value(now))
            .filter(AssetColumn::Id.eq(asset_id))
            .filter(AssetColumn::CurrentAssignee.is_null())
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        if update.rows_affected == 0 {
            return Err(RepositoryError::conflict(
                "Asset assignment changed concurrently; retry the operation",
            ));
        }

        HistoryActiveModel {
            id: Set(Uuid::new_v4()),
            asset_id: Set(asset_id),
            previous_assignee: Set(None),
            current_assignee: Set(Some(new_assignee_id)),
            assigned_date: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(RepositoryError::database_error)?;

        txn.commit().await.map_err(RepositoryError::database_error)?;

        tracing::info!(asset_id = %asset_id, assignee_id = %new_assignee_id, "Asset assigned");

        let asset = find_asset(self.db, asset_id).await?;
        Ok(asset)
    }

    /// Return an assigned asset, clearing its assignee pointer.
    ///
    /// Fails with `NotFound` for an unknown asset, `InvalidState` if the
    /// asset has no current assignee, and `Conflict` on a lost race.
    pub async fn return_asset(&self, asset_id: Uuid) -> Result<AssetModel, RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        let asset = find_asset(&txn, asset_id).await?;

        let Some(previous) = asset.current_assignee else {
            return Err(RepositoryError::invalid_state(
                "Asset is not currently assigned; nothing to return",
            ));
        };

        let now = Utc::now();

        let update = Asset::update_many()
            .col_expr(AssetColumn::CurrentAssignee, Expr::value(Value::Uuid(None)))
            .col_expr(AssetColumn::UpdatedAt, Expr::value(now))
            .filter(AssetColumn::Id.eq(asset_id))
            .filter(AssetColumn::CurrentAssignee.eq(previous))
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        if update.rows_affected == 0 {
            return Err(RepositoryError::conflict(
                "Asset assignment changed concurrently; retry the operation",
            ));
        }

        HistoryActiveModel {
            id: Set(Uuid::new_v4()),
            asset_id: Set(asset_id),
            previous_assignee: Set(Some(previous)),
            current_assignee: Set(None),
            assigned_date: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(RepositoryError::database_error)?;

        txn.commit().await.map_err(RepositoryError::database_error)?;

        tracing::info!(asset_id = %asset_id, previous_assignee = %previous, "Asset returned");

        let asset = find_asset(self.db, asset_id).await?;
        Ok(asset)
    }

    /// Full provenance chain for an asset, ascending by assignment date.
    ///
    /// Always reads the ledger's current state; nothing is cached between
    /// calls. Assignee ids are resolved to employee names where the
    /// employee still exists.
    pub async fn history(&self, asset_id: Uuid) -> Result<Vec<HistoryEntry>, RepositoryError> {
        find_asset(self.db, asset_id).await?;

        let entries = History::find()
            .filter(HistoryColumn::AssetId.eq(asset_id))
            .order_by_asc(HistoryColumn::AssignedDate)
            .order_by_asc(HistoryColumn::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        let mut employee_ids: Vec<Uuid> = entries
            .iter()
            .flat_map(|entry| [entry.previous_assignee, entry.current_assignee])
            .flatten()
            .collect();
        employee_ids.sort();
        employee_ids.dedup();

        let names: HashMap<Uuid, String> = if employee_ids.is_empty() {
            HashMap::new()
        } else {
            Employee::find()
                .filter(EmployeeColumn::Id.is_in(employee_ids))
                .all(self.db)
                .await
                .map_err(RepositoryError::database_error)?
                .into_iter()
                .map(|employee| (employee.id, employee.name))
                .collect()
        };

        let resolve = |id: Option<Uuid>| {
            id.map(|id| AssigneeSummary {
                id,
                name: names.get(&id).cloned(),
            })
        };

        Ok(entries
            .into_iter()
            .map(|entry| HistoryEntry {
                id: entry.id,
                asset_id: entry.asset_id,
                previous_assignee: resolve(entry.previous_assignee),
                current_assignee: resolve(entry.current_assignee),
                assigned_date: entry.assigned_date,
            })
            .collect())
    }
}

async fn find_asset<C>(conn: &C, asset_id: Uuid) -> Result<AssetModel, RepositoryError>
where
    C: ConnectionTrait,
{
    Asset::find_by_id(asset_id)
        .one(conn)
        .await
        .map_err(RepositoryError::database_error)?
        .ok_or_else(|| RepositoryError::not_found("Asset not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::{
        seed_asset, seed_asset_type, seed_employee, seed_team, setup_test_db,
    };

    async fn current_assignee(db: &DatabaseConnection, asset_id: Uuid) -> Option<Uuid> {
        Asset::find_by_id(asset_id)
            .one(db)
            .await
            .unwrap()
            .unwrap()
            .current_assignee
    }

    async fn ledger_len(db: &DatabaseConnection, asset_id: Uuid) -> usize {
        History::find()
            .filter(HistoryColumn::AssetId.eq(asset_id))
            .all(db)
            .await
            .unwrap()
            .len()
    }

    #[tokio::test]
    async fn test_assign_then_return_scenario() {
        let db = setup_test_db().await;
        let team_id = seed_team(&db, "Engineering").await;
        let type_id = seed_asset_type(&db, "Laptop").await;
        let employee_id = seed_employee(&db, team_id, "holder@example.com").await;
        let asset_id = seed_asset(&db, type_id, "ThinkPad").await;

        let service = AssignmentService::new(&db);

        let asset = service.assign(asset_id, employee_id).await.unwrap();
        assert_eq!(asset.current_assignee, Some(employee_id));

        let history = service.history(asset_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].previous_assignee.is_none());
        assert_eq!(
            history[0].current_assignee.as_ref().unwrap().id,
            employee_id
        );

        let asset = service.return_asset(asset_id).await.unwrap();
        assert!(asset.current_assignee.is_none());

        let history = service.history(asset_id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(
            history[1].previous_assignee.as_ref().unwrap().id,
            employee_id
        );
        assert!(history[1].current_assignee.is_none());
    }

    #[tokio::test]
    async fn test_return_without_assignment_fails() {
        let db = setup_test_db().await;
        let type_id = seed_asset_type(&db, "Laptop").await;
        let asset_id = seed_asset(&db, type_id, "ThinkPad").await;

        let service = AssignmentService::new(&db);

        let result = service.return_asset(asset_id).await;
        assert!(matches!(result, Err(RepositoryError::InvalidState(_))));

        // Failure wrote nothing
        assert_eq!(ledger_len(&db, asset_id).await, 0);
        assert!(current_assignee(&db, asset_id).await.is_none());
    }

    #[tokio::test]
    async fn test_assign_while_assigned_is_rejected() {
        let db = setup_test_db().await;
        let team_id = seed_team(&db, "Engineering").await;
        let type_id = seed_asset_type(&db, "Laptop").await;
        let e1 = seed_employee(&db, team_id, "first@example.com").await;
        let e2 = seed_employee(&db, team_id, "second@example.com").await;
        let asset_id = seed_asset(&db, type_id, "ThinkPad").await;

        let service = AssignmentService::new(&db);
        service.assign(asset_id, e1).await.unwrap();

        // Transfers require an explicit return first
        let result = service.assign(asset_id, e2).await;
        assert!(matches!(result, Err(RepositoryError::InvalidState(_))));

        // Pointer and ledger untouched by the failure
        assert_eq!(current_assignee(&db, asset_id).await, Some(e1));
        assert_eq!(ledger_len(&db, asset_id).await, 1);
    }

    #[tokio::test]
    async fn test_assign_to_nonexistent_employee() {
        let db = setup_test_db().await;
        let type_id = seed_asset_type(&db, "Laptop").await;
        let asset_id = seed_asset(&db, type_id, "ThinkPad").await;

        let service = AssignmentService::new(&db);
        let result = service.assign(asset_id, Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));

        assert!(current_assignee(&db, asset_id).await.is_none());
        assert_eq!(ledger_len(&db, asset_id).await, 0);
    }

    #[tokio::test]
    async fn test_history_for_unknown_asset() {
        let db = setup_test_db().await;
        let service = AssignmentService::new(&db);

        let result = service.history(Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_pointer_always_matches_latest_ledger_entry() {
        let db = setup_test_db().await;
        let team_id = seed_team(&db, "Engineering").await;
        let type_id = seed_asset_type(&db, "Laptop").await;
        let e1 = seed_employee(&db, team_id, "a@example.com").await;
        let e2 = seed_employee(&db, team_id, "b@example.com").await;
        let asset_id = seed_asset(&db, type_id, "ThinkPad").await;

        let service = AssignmentService::new(&db);

        // Assign, return, assign to someone else, return again
        service.assign(asset_id, e1).await.unwrap();
        service.return_asset(asset_id).await.unwrap();
        service.assign(asset_id, e2).await.unwrap();
        service.return_asset(asset_id).await.unwrap();

        // Interleave a failed operation; it must not disturb the invariant
        let _ = service.return_asset(asset_id).await;

        let pointer = current_assignee(&db, asset_id).await;
        let history = service.history(asset_id).await.unwrap();
        assert_eq!(history.len(), 4);
        let last = history.last().unwrap();
        assert_eq!(
            pointer,
            last.current_assignee.as_ref().map(|summary| summary.id)
        );
    }

    #[tokio::test]
    async fn test_history_resolves_names_and_survives_employee_deletion() {
        let db = setup_test_db().await;
        let team_id = seed_team(&db, "Engineering").await;
        let type_id = seed_asset_type(&db, "Laptop").await;
        let employee_id = seed_employee(&db, team_id, "named@example.com").await;
        let asset_id = seed_asset(&db, type_id, "ThinkPad").await;

        let service = AssignmentService::new(&db);
        service.assign(asset_id, employee_id).await.unwrap();
        service.return_asset(asset_id).await.unwrap();

        let history = service.history(asset_id).await.unwrap();
        assert_eq!(
            history[0].current_assignee.as_ref().unwrap().name.as_deref(),
            Some("Test Employee")
        );

        // Delete the employee; ledger keeps the id, name resolution degrades
        use sea_orm::ModelTrait;
        Employee::find_by_id(employee_id)
            .one(&db)
            .await
            .unwrap()
            .unwrap()
            .delete(&db)
            .await
            .unwrap();

        let history = service.history(asset_id).await.unwrap();
        let summary = history[0].current_assignee.as_ref().unwrap();
        assert_eq!(summary.id, employee_id);
        assert!(summary.name.is_none());
    }

    #[tokio::test]
    async fn test_ledger_is_append_only_across_operations() {
        let db = setup_test_db().await;
        let team_id = seed_team(&db, "Engineering").await;
        let type_id = seed_asset_type(&db, "Laptop").await;
        let employee_id = seed_employee(&db, team_id, "mono@example.com").await;
        let asset_id = seed_asset(&db, type_id, "ThinkPad").await;

        let service = AssignmentService::new(&db);

        let mut previous_len = 0;
        let mut previous_ids: Vec<Uuid> = Vec::new();
        for _ in 0..3 {
            service.assign(asset_id, employee_id).await.unwrap();
            service.return_asset(asset_id).await.unwrap();

            let history = service.history(asset_id).await.unwrap();
            assert!(history.len() > previous_len);

            // Earlier entries keep their identity and order
            let ids: Vec<Uuid> = history.iter().map(|entry| entry.id).collect();
            assert_eq!(&ids[..previous_ids.len()], previous_ids.as_slice());

            previous_len = history.len();
            previous_ids = ids;
        }
    }
}
