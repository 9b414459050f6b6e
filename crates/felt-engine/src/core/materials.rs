//! Physics surface materials and their pairwise contact properties.

/// Identifier of a physics surface material. Zero is reserved for "no material".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// A named physics surface material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsMaterial {
    pub id: MaterialId,
    pub name: &'static str,
}

/// Friction and restitution used when two materials touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactMaterial {
    pub a: MaterialId,
    pub b: MaterialId,
    pub friction: f32,
    pub restitution: f32,
}

impl ContactMaterial {
    /// Contact properties applied to pairs nobody registered.
    pub const FALLBACK: ContactMaterial = ContactMaterial {
        a: MaterialId(0),
        b: MaterialId(0),
        friction: 0.3,
        restitution: 0.0,
    };

    /// Order-independent match.
    pub fn matches(&self, a: MaterialId, b: MaterialId) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }
}

/// Find the contact pair for two materials, in either order.
pub fn find_contact(pairs: &[ContactMaterial], a: MaterialId, b: MaterialId) -> Option<&ContactMaterial> {
    pairs.iter().find(|pair| pair.matches(a, b))
}

/// The fixed material set of the table. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct MaterialRegistry {
    ball: PhysicsMaterial,
    table_surface: PhysicsMaterial,
    table_wall: PhysicsMaterial,
    contacts: [ContactMaterial; 3],
}

impl MaterialRegistry {
    pub fn new() -> Self {
        let ball = PhysicsMaterial { id: MaterialId(1), name: "ball" };
        let table_surface = PhysicsMaterial { id: MaterialId(2), name: "table-surface" };
        let table_wall = PhysicsMaterial { id: MaterialId(3), name: "table-wall" };

        // Near-frictionless felt and cushions; balls grip each other a little.
        let contacts = [
            ContactMaterial { a: ball.id, b: table_surface.id, friction: 0.0001, restitution: 0.4 },
            ContactMaterial { a: ball.id, b: table_wall.id, friction: 0.0001, restitution: 0.5 },
            ContactMaterial { a: ball.id, b: ball.id, friction: 0.06, restitution: 0.5 },
        ];

        Self {
            ball,
            table_surface,
            table_wall,
            contacts,
        }
    }

    pub fn ball(&self) -> MaterialId {
        self.ball.id
    }

    pub fn table_surface(&self) -> MaterialId {
        self.table_surface.id
    }

    pub fn table_wall(&self) -> MaterialId {
        self.table_wall.id
    }

    pub fn materials(&self) -> [PhysicsMaterial; 3] {
        [self.ball, self.table_surface, self.table_wall]
    }

    /// Contact pairs to register with the physics world.
    pub fn contact_materials(&self) -> &[ContactMaterial] {
        &self.contacts
    }

    pub fn contact(&self, a: MaterialId, b: MaterialId) -> Option<&ContactMaterial> {
        find_contact(&self.contacts, a, b)
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::new()
    }
}
