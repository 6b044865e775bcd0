//! The relationship dataset: locations, people and swarms, each carrying the
//! color token and icon name its badge is drawn with.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub color: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    /// Id of the person's [`Location`].
    pub location: String,
    pub color: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub person: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swarm {
    pub id: String,
    pub name: String,
    pub color: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub roles: Vec<Role>,
}

impl Swarm {
    pub fn role_of(&self, person_id: &str) -> Option<&str> {
        self.roles
            .iter()
            .find(|role| role.person == person_id)
            .map(|role| role.role.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Location,
    Person,
    Swarm,
}

/// The badge-relevant view of any node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef<'a> {
    pub kind: NodeKind,
    pub id: &'a str,
    pub name: &'a str,
    pub color: &'a str,
    pub icon: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub locations: Vec<Location>,
    pub people: Vec<Person>,
    pub swarms: Vec<Swarm>,
}

impl Dataset {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|person| person.id == id)
    }

    pub fn swarm(&self, id: &str) -> Option<&Swarm> {
        self.swarms.iter().find(|swarm| swarm.id == id)
    }

    pub fn people_at_location<'a>(&'a self, location_id: &'a str) -> impl Iterator<Item = &'a Person> {
        self.people
            .iter()
            .filter(move |person| person.location == location_id)
    }

    pub fn swarms_for_person<'a>(&'a self, person_id: &'a str) -> impl Iterator<Item = &'a Swarm> {
        self.swarms
            .iter()
            .filter(move |swarm| swarm.roles.iter().any(|role| role.person == person_id))
    }

    /// Every node, locations first, then people, then swarms.
    pub fn nodes(&self) -> Vec<NodeRef<'_>> {
        let locations = self.locations.iter().map(|l| NodeRef {
            kind: NodeKind::Location,
            id: &l.id,
            name: &l.name,
            color: &l.color,
            icon: &l.icon,
        });
        let people = self.people.iter().map(|p| NodeRef {
            kind: NodeKind::Person,
            id: &p.id,
            name: &p.name,
            color: &p.color,
            icon: &p.icon,
        });
        let swarms = self.swarms.iter().map(|s| NodeRef {
            kind: NodeKind::Swarm,
            id: &s.id,
            name: &s.name,
            color: &s.color,
            icon: &s.icon,
        });
        locations.chain(people).chain(swarms).collect()
    }

    /// Every icon name in the dataset, for preloading.
    pub fn icon_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.nodes().iter().map(|node| node.icon).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

pub fn read(yaml: &str) -> Result<Dataset> {
    let dataset: Dataset = serde_yaml::from_str(yaml)?;
    Ok(dataset)
}

pub fn write(dataset: &Dataset) -> Result<String> {
    serde_yaml::to_string(dataset).map_err(|err| Error::Dataset(err.to_string()))
}
