//! Wire records exchanged with a case-link provider.
//!
//! Every DTO converts into its domain record through `TryFrom`, which runs
//! the domain validation. Nothing is clamped: a self-link, an out-of-range
//! strength or an unknown type is an [`ClientError::InvalidRecord`].

use crate::error::ClientError;
use caselink_domain::{
    Case, CaseId, Evidence, EvidenceId, EvidenceKind, Involvement, Link, LinkId, LinkType,
    LinkTypeSummary, Person, PersonId, PersonRole, RecordSet, TierCounts,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Link as sent by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkDto {
    /// Link identifier
    pub id: u64,
    /// First case
    pub case1: u64,
    /// Second case
    pub case2: u64,
    /// Wire name of the link type
    pub link_type: String,
    /// Strength in [0, 1]
    pub link_strength: f64,
}

impl TryFrom<LinkDto> for Link {
    type Error = ClientError;

    fn try_from(dto: LinkDto) -> Result<Self, Self::Error> {
        let link_type = LinkType::parse(&dto.link_type).ok_or_else(|| {
            ClientError::InvalidRecord(format!("Link {}: unknown type {}", dto.id, dto.link_type))
        })?;
        Link::new(
            LinkId::new(dto.id),
            CaseId::new(dto.case1),
            CaseId::new(dto.case2),
            link_type,
            dto.link_strength,
        )
        .map_err(|e| ClientError::InvalidRecord(format!("Link {}: {}", dto.id, e)))
    }
}

impl From<&Link> for LinkDto {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id.value(),
            case1: link.pair.first().value(),
            case2: link.pair.second().value(),
            link_type: link.link_type.as_str().to_string(),
            link_strength: link.strength.value(),
        }
    }
}

/// Per-type aggregate as sent by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkTypeSummaryDto {
    /// Wire name of the link type
    pub link_type: String,
    /// Number of links
    pub count: usize,
    /// Mean strength
    pub avg_strength: f64,
}

impl TryFrom<LinkTypeSummaryDto> for LinkTypeSummary {
    type Error = ClientError;

    fn try_from(dto: LinkTypeSummaryDto) -> Result<Self, Self::Error> {
        let link_type = LinkType::parse(&dto.link_type).ok_or_else(|| {
            ClientError::InvalidRecord(format!("Summary: unknown link type {}", dto.link_type))
        })?;
        Ok(LinkTypeSummary {
            link_type,
            count: dto.count,
            avg_strength: dto.avg_strength,
            tiers: TierCounts::default(),
        })
    }
}

/// Case as sent by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDto {
    /// Case identifier
    pub id: u64,
    /// Human-readable case number
    pub case_number: String,
    /// Offence type
    #[serde(default)]
    pub case_type: String,
    /// Province
    #[serde(default)]
    pub province: String,
}

impl From<CaseDto> for Case {
    fn from(dto: CaseDto) -> Self {
        Case::new(CaseId::new(dto.id), dto.case_number, dto.case_type, dto.province)
    }
}

/// Person as sent by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDto {
    /// Person identifier
    pub id: u64,
    /// Full name
    pub name: String,
    /// Role, if any
    #[serde(default)]
    pub role: Option<String>,
}

impl From<PersonDto> for Person {
    fn from(dto: PersonDto) -> Self {
        let mut person = Person::new(PersonId::new(dto.id), dto.name);
        if let Some(raw) = dto.role.as_deref().filter(|r| !r.trim().is_empty()) {
            match PersonRole::parse(raw) {
                Some(role) => person = person.with_role(role),
                None => warn!(person_id = dto.id, role = raw, "Unknown person role, treating as unset"),
            }
        }
        person
    }
}

/// Case/person association as sent by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvolvementDto {
    /// Case identifier
    pub case_id: u64,
    /// Person identifier
    pub person_id: u64,
}

impl From<InvolvementDto> for Involvement {
    fn from(dto: InvolvementDto) -> Self {
        Involvement::new(CaseId::new(dto.case_id), PersonId::new(dto.person_id))
    }
}

/// Artifact as sent by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceDto {
    /// Artifact identifier
    pub id: u64,
    /// Owning case
    pub case_id: u64,
    /// Artifact kind name
    pub kind: String,
    /// Display label
    pub label: String,
    /// Display color override
    #[serde(default)]
    pub color: Option<String>,
}

impl TryFrom<EvidenceDto> for Evidence {
    type Error = ClientError;

    fn try_from(dto: EvidenceDto) -> Result<Self, Self::Error> {
        let kind = EvidenceKind::parse(&dto.kind).ok_or_else(|| {
            ClientError::InvalidRecord(format!("Evidence {}: unknown kind {}", dto.id, dto.kind))
        })?;
        let evidence = Evidence::new(EvidenceId::new(dto.id), CaseId::new(dto.case_id), kind, dto.label);
        Ok(match dto.color {
            Some(color) => evidence.with_color(color),
            None => evidence,
        })
    }
}

/// Bundle of records, used for neighborhood responses and import files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSetDto {
    /// Cases
    pub cases: Vec<CaseDto>,
    /// Persons
    pub persons: Vec<PersonDto>,
    /// Case/person associations
    pub involvements: Vec<InvolvementDto>,
    /// Artifacts
    pub evidence: Vec<EvidenceDto>,
    /// Links
    pub links: Vec<LinkDto>,
}

impl RecordSetDto {
    /// Parse a record set from JSON text
    pub fn from_json(text: &str) -> Result<Self, ClientError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl TryFrom<RecordSetDto> for RecordSet {
    type Error = ClientError;

    fn try_from(dto: RecordSetDto) -> Result<Self, Self::Error> {
        Ok(RecordSet {
            cases: dto.cases.into_iter().map(Case::from).collect(),
            persons: dto.persons.into_iter().map(Person::from).collect(),
            involvements: dto.involvements.into_iter().map(Involvement::from).collect(),
            evidence: dto
                .evidence
                .into_iter()
                .map(Evidence::try_from)
                .collect::<Result<_, _>>()?,
            links: dto
                .links
                .into_iter()
                .map(Link::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}
