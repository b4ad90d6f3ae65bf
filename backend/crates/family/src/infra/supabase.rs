//! PostgREST-backed family store

use chrono::{DateTime, Utc};
use platform::supabase::{SupabaseClient, SupabaseError};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{
    child::{Child, NewChild},
    family::Family,
    invitation::Invitation,
    membership::Membership,
    profile::Profile,
};
use crate::domain::repository::{Caller, FamilyStore};
use crate::domain::value_object::{
    family_id::FamilyId, family_name::FamilyName, invitation_code::InvitationCode,
    member_role::MemberRole,
};
use crate::error::{FamilyError, FamilyResult};

const FAMILIES: &str = "families";
const FAMILY_MEMBERS: &str = "family_members";
const CHILDREN: &str = "children";
const INVITATION_CODES: &str = "invitation_codes";
const PROFILES: &str = "profiles";

/// Postgres unique violation, as reported by PostgREST
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct SupabaseFamilyStore {
    client: SupabaseClient,
}

impl SupabaseFamilyStore {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

fn eq(value: &str) -> String {
    format!("eq.{value}")
}

// ============================================================================
// Rows
// ============================================================================

#[derive(Serialize)]
struct NewFamilyRow<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct FamilyRow {
    id: String,
    name: String,
}

impl From<FamilyRow> for Family {
    fn from(row: FamilyRow) -> Self {
        Self {
            id: FamilyId::from_db(row.id),
            name: row.name,
        }
    }
}

#[derive(Serialize)]
struct NewMemberRow<'a> {
    family_id: &'a str,
    user_id: &'a str,
    role: MemberRole,
}

/// Membership with the family embedded through the foreign key
#[derive(Deserialize)]
struct MembershipRow {
    role: MemberRole,
    families: Option<FamilyRow>,
}

#[derive(Serialize)]
struct NewChildRow<'a> {
    family_id: &'a str,
    first_name: &'a str,
    color: &'a str,
}

#[derive(Serialize)]
struct NewInvitationRow<'a> {
    code: &'a str,
    family_id: &'a str,
    created_by: &'a str,
    expires_at: DateTime<Utc>,
}

// ============================================================================
// Store
// ============================================================================

impl FamilyStore for SupabaseFamilyStore {
    async fn create_family(&self, caller: Caller<'_>, name: &FamilyName) -> FamilyResult<Family> {
        let rows: Vec<FamilyRow> = self
            .client
            .insert(FAMILIES, caller.access_token, &[NewFamilyRow { name: name.as_str() }])
            .await?;

        rows.into_iter()
            .next()
            .map(Family::from)
            .ok_or_else(|| FamilyError::Internal("family insert returned no row".into()))
    }

    async fn add_member(
        &self,
        caller: Caller<'_>,
        family_id: &FamilyId,
        role: MemberRole,
    ) -> FamilyResult<()> {
        let row = NewMemberRow {
            family_id: family_id.as_str(),
            user_id: caller.user_id,
            role,
        };

        match self
            .client
            .insert_minimal(FAMILY_MEMBERS, caller.access_token, &[row])
            .await
        {
            Ok(()) => Ok(()),
            Err(e) if is_duplicate(&e) => Err(FamilyError::AlreadyMember),
            Err(e) => Err(e.into()),
        }
    }

    async fn add_children(
        &self,
        caller: Caller<'_>,
        family_id: &FamilyId,
        children: &[NewChild],
    ) -> FamilyResult<()> {
        let rows: Vec<NewChildRow<'_>> = children
            .iter()
            .map(|child| NewChildRow {
                family_id: family_id.as_str(),
                first_name: &child.first_name,
                color: child.color.as_str(),
            })
            .collect();

        self.client
            .insert_minimal(CHILDREN, caller.access_token, rows.as_slice())
            .await?;
        Ok(())
    }

    async fn create_invitation(&self, caller: Caller<'_>, invitation: &Invitation) -> FamilyResult<()> {
        let row = NewInvitationRow {
            code: invitation.code.as_str(),
            family_id: invitation.family_id.as_str(),
            created_by: &invitation.created_by,
            expires_at: invitation.expires_at,
        };

        self.client
            .insert_minimal(INVITATION_CODES, caller.access_token, &[row])
            .await?;
        Ok(())
    }

    async fn find_invitation(
        &self,
        caller: Caller<'_>,
        code: &InvitationCode,
    ) -> FamilyResult<Option<Invitation>> {
        let rows: Vec<Invitation> = self
            .client
            .select(
                INVITATION_CODES,
                caller.access_token,
                &[("code", eq(code.as_str())), ("limit", "1".to_string())],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn memberships(&self, caller: Caller<'_>) -> FamilyResult<Vec<Membership>> {
        let rows: Vec<MembershipRow> = self
            .client
            .select(
                FAMILY_MEMBERS,
                caller.access_token,
                &[
                    ("select", "role,families(id,name)".to_string()),
                    ("user_id", eq(caller.user_id)),
                ],
            )
            .await?;

        // Families hidden by row-level security come back as null
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                row.families.map(|family| Membership {
                    family: family.into(),
                    role: row.role,
                })
            })
            .collect())
    }

    async fn find_profile(&self, caller: Caller<'_>) -> FamilyResult<Option<Profile>> {
        let rows: Vec<Profile> = self
            .client
            .select(
                PROFILES,
                caller.access_token,
                &[("id", eq(caller.user_id)), ("limit", "1".to_string())],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn children(&self, caller: Caller<'_>, family_id: &FamilyId) -> FamilyResult<Vec<Child>> {
        let children = self
            .client
            .select(
                CHILDREN,
                caller.access_token,
                &[
                    ("family_id", eq(family_id.as_str())),
                    ("order", "first_name.asc".to_string()),
                ],
            )
            .await?;
        Ok(children)
    }
}

fn is_duplicate(e: &SupabaseError) -> bool {
    e.status() == Some(409) || e.code() == Some(UNIQUE_VIOLATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_row_with_embedded_family() {
        let rows: Vec<MembershipRow> = serde_json::from_str(
            r#"[{"role":"admin","families":{"id":"f1","name":"The Does"}},
                {"role":"member","families":null}]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].role, MemberRole::Admin);
        assert!(rows[1].families.is_none());
    }

    #[test]
    fn test_invitation_row_parses_postgres_timestamp() {
        let invitation: Invitation = serde_json::from_str(
            r#"{"code":"ABCD2345","family_id":"f1","created_by":"u1",
                "expires_at":"2026-11-18T10:00:00.123456+00:00"}"#,
        )
        .unwrap();
        assert_eq!(invitation.code.as_str(), "ABCD2345");
    }

    #[test]
    fn test_duplicate_detection() {
        let conflict = SupabaseError::from_response(
            409,
            br#"{"code":"23505","message":"duplicate key value violates unique constraint"}"#,
        );
        assert!(is_duplicate(&conflict));
        let other = SupabaseError::from_response(400, br#"{"code":"22P02","message":"bad"}"#);
        assert!(!is_duplicate(&other));
    }
}
