//! Reference catalogs: people and planets.
//!
//! Every attribute is free text. Creation requires all of them; updates are
//! partial and leave absent attributes untouched.

use serde::Serialize;

// ─── People ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
  pub id:         i64,
  pub name:       String,
  pub height:     String,
  pub mass:       String,
  pub hair_color: String,
  pub skin_color: String,
  pub eye_color:  String,
  pub birth_year: String,
  pub gender:     String,
}

/// Input to [`crate::store::RecordStore::create_person`].
#[derive(Debug, Clone)]
pub struct NewPerson {
  pub name:       String,
  pub height:     String,
  pub mass:       String,
  pub hair_color: String,
  pub skin_color: String,
  pub eye_color:  String,
  pub birth_year: String,
  pub gender:     String,
}

impl NewPerson {
  pub fn into_person(self, id: i64) -> Person {
    Person {
      id,
      name: self.name,
      height: self.height,
      mass: self.mass,
      hair_color: self.hair_color,
      skin_color: self.skin_color,
      eye_color: self.eye_color,
      birth_year: self.birth_year,
      gender: self.gender,
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct PersonPatch {
  pub name:       Option<String>,
  pub height:     Option<String>,
  pub mass:       Option<String>,
  pub hair_color: Option<String>,
  pub skin_color: Option<String>,
  pub eye_color:  Option<String>,
  pub birth_year: Option<String>,
  pub gender:     Option<String>,
}

impl PersonPatch {
  pub fn apply(self, person: &mut Person) {
    replace(&mut person.name, self.name);
    replace(&mut person.height, self.height);
    replace(&mut person.mass, self.mass);
    replace(&mut person.hair_color, self.hair_color);
    replace(&mut person.skin_color, self.skin_color);
    replace(&mut person.eye_color, self.eye_color);
    replace(&mut person.birth_year, self.birth_year);
    replace(&mut person.gender, self.gender);
  }
}

// ─── Planets ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Planet {
  pub id:         i64,
  pub name:       String,
  pub diameter:   String,
  pub climate:    String,
  pub gravity:    String,
  pub terrain:    String,
  pub population: String,
}

/// Input to [`crate::store::RecordStore::create_planet`].
#[derive(Debug, Clone)]
pub struct NewPlanet {
  pub name:       String,
  pub diameter:   String,
  pub climate:    String,
  pub gravity:    String,
  pub terrain:    String,
  pub population: String,
}

impl NewPlanet {
  pub fn into_planet(self, id: i64) -> Planet {
    Planet {
      id,
      name: self.name,
      diameter: self.diameter,
      climate: self.climate,
      gravity: self.gravity,
      terrain: self.terrain,
      population: self.population,
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct PlanetPatch {
  pub name:       Option<String>,
  pub diameter:   Option<String>,
  pub climate:    Option<String>,
  pub gravity:    Option<String>,
  pub terrain:    Option<String>,
  pub population: Option<String>,
}

impl PlanetPatch {
  pub fn apply(self, planet: &mut Planet) {
    replace(&mut planet.name, self.name);
    replace(&mut planet.diameter, self.diameter);
    replace(&mut planet.climate, self.climate);
    replace(&mut planet.gravity, self.gravity);
    replace(&mut planet.terrain, self.terrain);
    replace(&mut planet.population, self.population);
  }
}

fn replace(slot: &mut String, value: Option<String>) {
  if let Some(v) = value {
    *slot = v;
  }
}
