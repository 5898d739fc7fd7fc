use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    FederativeDelegate,
    Referee,
    Coach,
    Guest,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::FederativeDelegate => "FEDERATIVE_DELEGATE",
            Self::Referee => "REFEREE",
            Self::Coach => "COACH",
            Self::Guest => "GUEST",
        }
    }

    /// Permissions every user with this role holds
    pub fn default_permissions(&self) -> &'static [Permission] {
        use Permission::*;

        match self {
            Self::Admin => Permission::ALL,
            Self::FederativeDelegate => &[
                ManageTeams,
                ManageWrestlers,
                ManageCompetitions,
                ManageMatches,
                ManageMatchActs,
                ManageReferees,
            ],
            Self::Referee => &[ManageMatchActs],
            Self::Coach => &[ManageOwnTeam, ManageWrestlers],
            Self::Guest => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ManageUsers,
    ManageTeams,
    ManageOwnTeam,
    ManageWrestlers,
    ManageCompetitions,
    ManageMatches,
    ManageMatchActs,
    ManageReferees,
}

impl Permission {
    pub const ALL: &'static [Permission] = &[
        Self::ManageUsers,
        Self::ManageTeams,
        Self::ManageOwnTeam,
        Self::ManageWrestlers,
        Self::ManageCompetitions,
        Self::ManageMatches,
        Self::ManageMatchActs,
        Self::ManageReferees,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Island {
    Tenerife,
    GranCanaria,
    Lanzarote,
    Fuerteventura,
    LaPalma,
    LaGomera,
    ElHierro,
}

impl Island {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tenerife => "TENERIFE",
            Self::GranCanaria => "GRAN_CANARIA",
            Self::Lanzarote => "LANZAROTE",
            Self::Fuerteventura => "FUERTEVENTURA",
            Self::LaPalma => "LA_PALMA",
            Self::LaGomera => "LA_GOMERA",
            Self::ElHierro => "EL_HIERRO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DivisionCategory {
    Primera,
    Segunda,
    Tercera,
    Regional,
}

impl DivisionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primera => "PRIMERA",
            Self::Segunda => "SEGUNDA",
            Self::Tercera => "TERCERA",
            Self::Regional => "REGIONAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeCategory {
    Benjamin,
    Alevin,
    Infantil,
    Cadete,
    Juvenil,
    Senior,
    Veterano,
}

impl AgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Benjamin => "BENJAMIN",
            Self::Alevin => "ALEVIN",
            Self::Infantil => "INFANTIL",
            Self::Cadete => "CADETE",
            Self::Juvenil => "JUVENIL",
            Self::Senior => "SENIOR",
            Self::Veterano => "VETERANO",
        }
    }
}

/// Competitive ranking of a wrestler, from the strongest "puntal" down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WrestlerClassification {
    PuntalA,
    PuntalB,
    PuntalC,
    DestacadoA,
    DestacadoB,
    DestacadoC,
    NoClasificado,
}

impl WrestlerClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PuntalA => "PUNTAL_A",
            Self::PuntalB => "PUNTAL_B",
            Self::PuntalC => "PUNTAL_C",
            Self::DestacadoA => "DESTACADO_A",
            Self::DestacadoB => "DESTACADO_B",
            Self::DestacadoC => "DESTACADO_C",
            Self::NoClasificado => "NO_CLASIFICADO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FavoriteType {
    Team,
    Wrestler,
    Competition,
}

impl FavoriteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Team => "TEAM",
            Self::Wrestler => "WRESTLER",
            Self::Competition => "COMPETITION",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoutWinner {
    Local,
    Visitor,
    /// Wrestlers separated without a decision
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureParty {
    LocalCaptain,
    VisitorCaptain,
    MainReferee,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_name<T: Serialize>(value: &T) -> String {
        serde_json::to_value(value)
            .unwrap()
            .as_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_as_str_matches_serialized_names() {
        for island in [
            Island::Tenerife,
            Island::GranCanaria,
            Island::Lanzarote,
            Island::Fuerteventura,
            Island::LaPalma,
            Island::LaGomera,
            Island::ElHierro,
        ] {
            assert_eq!(wire_name(&island), island.as_str());
        }

        for division in [
            DivisionCategory::Primera,
            DivisionCategory::Segunda,
            DivisionCategory::Tercera,
            DivisionCategory::Regional,
        ] {
            assert_eq!(wire_name(&division), division.as_str());
        }

        for category in [
            AgeCategory::Benjamin,
            AgeCategory::Alevin,
            AgeCategory::Infantil,
            AgeCategory::Cadete,
            AgeCategory::Juvenil,
            AgeCategory::Senior,
            AgeCategory::Veterano,
        ] {
            assert_eq!(wire_name(&category), category.as_str());
        }

        for classification in [
            WrestlerClassification::PuntalA,
            WrestlerClassification::DestacadoC,
            WrestlerClassification::NoClasificado,
        ] {
            assert_eq!(wire_name(&classification), classification.as_str());
        }

        for role in [
            UserRole::Admin,
            UserRole::FederativeDelegate,
            UserRole::Referee,
            UserRole::Coach,
            UserRole::Guest,
        ] {
            assert_eq!(wire_name(&role), role.as_str());
        }

        for kind in [FavoriteType::Team, FavoriteType::Wrestler, FavoriteType::Competition] {
            assert_eq!(wire_name(&kind), kind.as_str());
        }
    }

    #[test]
    fn test_admin_holds_every_permission() {
        assert_eq!(UserRole::Admin.default_permissions(), Permission::ALL);
    }

    #[test]
    fn test_guest_holds_nothing() {
        assert!(UserRole::Guest.default_permissions().is_empty());
    }

    #[test]
    fn test_coach_is_limited_to_own_team() {
        let coach = UserRole::Coach.default_permissions();
        assert!(coach.contains(&Permission::ManageOwnTeam));
        assert!(!coach.contains(&Permission::ManageTeams));
    }
}
