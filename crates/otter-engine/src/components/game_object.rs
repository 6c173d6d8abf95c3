use glam::Vec3;

use super::{Component, ComponentKind};
use crate::api::types::GameObjectId;

/// World position and Euler rotation (degrees), the slice of a game object
/// that behaviours read and write.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

/// A named object in the scene with a transform and attached components.
#[derive(Debug, Clone)]
pub struct GameObject {
    /// Unique identifier.
    pub id: GameObjectId,
    /// Display name, also used for lookups.
    pub name: String,
    position: Vec3,
    /// Euler angles in degrees.
    rotation: Vec3,
    pub(crate) parent: Option<GameObjectId>,
    pub(crate) children: Vec<GameObjectId>,
    pub(crate) components: Vec<Component>,
    pub(crate) awake: bool,
}

impl GameObject {
    /// Create a new object with the given ID at the origin.
    pub fn new(id: GameObjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
            awake: false,
        }
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_component(mut self, component: impl Into<Component>) -> Self {
        self.components.push(component.into());
        self
    }

    // -- Transform access --

    pub fn get_position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn get_rotation_euler(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
        }
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.position = transform.position;
        self.rotation = transform.rotation;
    }

    // -- Hierarchy --

    pub fn parent(&self) -> Option<GameObjectId> {
        self.parent
    }

    pub fn children(&self) -> &[GameObjectId] {
        &self.children
    }

    // -- Components --

    /// Attach a component and return a handle to it.
    pub fn add<C>(&mut self, component: C) -> &mut C
    where
        C: ComponentKind + Into<Component>,
    {
        self.components.push(component.into());
        let last = self.components.len() - 1;
        match C::from_component_mut(&mut self.components[last]) {
            Some(c) => c,
            None => unreachable!("component variant does not match its own kind"),
        }
    }

    /// First attached component of kind `C`.
    pub fn get<C: ComponentKind>(&self) -> Option<&C> {
        self.components.iter().find_map(C::from_component)
    }

    pub fn get_mut<C: ComponentKind>(&mut self) -> Option<&mut C> {
        self.components.iter_mut().find_map(C::from_component_mut)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut [Component] {
        &mut self.components
    }

    pub fn is_awake(&self) -> bool {
        self.awake
    }

    /// Run `awake` on every component. Only the first call has an effect.
    pub fn awake(&mut self) {
        if self.awake {
            return;
        }
        let transform = self.transform();
        for component in &mut self.components {
            component.awake(&transform);
        }
        self.awake = true;
    }

    /// Tick every component against this object's transform, then apply it.
    pub fn update(&mut self, dt: f32) {
        let mut transform = self.transform();
        for component in &mut self.components {
            component.update(dt, &mut transform);
        }
        self.set_transform(transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render::RenderComponent;
    use crate::components::rotating::RotatingBehaviour;

    #[test]
    fn add_returns_typed_handle() {
        let mut gem = GameObject::new(GameObjectId(1), "Red Gem");
        gem.add(RotatingBehaviour::with_start_time(0.5))
            .set_rotation_speed(Vec3::new(0.0, 0.0, 90.0));

        let behaviour = gem.get::<RotatingBehaviour>().unwrap();
        assert_eq!(behaviour.rotation_speed(), Vec3::new(0.0, 0.0, 90.0));
        assert!(gem.get::<RenderComponent>().is_none());
    }

    #[test]
    fn awake_runs_once() {
        let mut gem = GameObject::new(GameObjectId(1), "Gem")
            .with_position(Vec3::new(0.0, 0.0, 1.0))
            .with_component(RotatingBehaviour::new());
        gem.awake();
        gem.set_position(Vec3::new(0.0, 0.0, 9.0));
        gem.awake();

        let osc = gem.get::<RotatingBehaviour>().unwrap().oscillator();
        assert_eq!(osc.keypoints(), &[1.0, 3.0, 1.0]);
    }

    #[test]
    fn update_without_behaviours_keeps_transform() {
        let mut plane = GameObject::new(GameObjectId(2), "Plane")
            .with_position(Vec3::new(1.0, 2.0, 3.0))
            .with_component(RenderComponent::default());
        plane.update(0.5);
        assert_eq!(plane.get_position(), Vec3::new(1.0, 2.0, 3.0));
    }
}
