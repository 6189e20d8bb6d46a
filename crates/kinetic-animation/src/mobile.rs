//! Mobile Scene Graph
//!
//! A binary tree of hanging meshes. Each node spins its mesh and its arms
//! independently about the vertical axis, and its children hang from the
//! ends of its rotated arms.

use glam::{Mat4, Vec3};
use kinetic_core::math::{self, Bounds};
use kinetic_core::{CoreResult, Mesh, WireMesh};
use kinetic_renderer::{Material, Renderer, RendererResult};

use crate::builder::MobileBuilder;
use crate::tracker::AnimationTracker;

/// One node of a mobile, owning its subtree
#[derive(Debug, Clone)]
pub struct Mobile {
    pub(crate) mesh: Mesh,
    pub(crate) material: Material,
    pub(crate) arms: WireMesh,
    /// Half the distance between the two children along local X
    pub(crate) radius: f32,
    pub(crate) parent_height: f32,
    pub(crate) child_height: Option<f32>,
    pub(crate) left: Option<Box<Mobile>>,
    pub(crate) right: Option<Box<Mobile>>,
    pub(crate) rotation: AnimationTracker,
    pub(crate) arm_rotation: AnimationTracker,
    /// Horizontal hang offset; zero below the root
    pub(crate) origin: Vec3,
}

impl Mobile {
    /// Start building a mobile whose root displays `mesh`
    pub fn builder(mesh: Mesh) -> MobileBuilder {
        MobileBuilder::new(mesh)
    }

    /// Hand every mesh and arm to the renderer once before the first frame
    pub fn setup<R: Renderer + ?Sized>(&self, renderer: &mut R) -> RendererResult<()> {
        log::debug!("setting up mobile with {} nodes", self.node_count());
        self.setup_node(renderer)
    }

    fn setup_node<R: Renderer + ?Sized>(&self, renderer: &mut R) -> RendererResult<()> {
        if self.mesh.has_faces() {
            renderer.prepare_mesh(&self.mesh)?;
        }
        renderer.prepare_wire(&self.arms)?;
        for child in self.children() {
            child.setup_node(renderer)?;
        }
        Ok(())
    }

    /// Advance every tracker to `now` and draw the tree under `parent`.
    ///
    /// Call once per frame; each tracker is advanced exactly once.
    pub fn draw<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        parent: Mat4,
        now: f64,
    ) -> RendererResult<()> {
        let parent = parent * Mat4::from_translation(self.origin);

        let mesh_world = parent * math::rotate_y_deg(self.rotation.advance(now));
        if self.mesh.has_faces() {
            renderer.draw_mesh(&self.mesh, &self.material, mesh_world)?;
        }

        let arm_world = parent * math::rotate_y_deg(self.arm_rotation.advance(now));
        renderer.draw_wire(&self.arms, arm_world)?;

        let radius = self.radius;
        if let Some(left) = self.left.as_mut() {
            left.draw(renderer, arm_world * hang_offset(-radius), now)?;
        }
        if let Some(right) = self.right.as_mut() {
            right.draw(renderer, arm_world * hang_offset(radius), now)?;
        }
        Ok(())
    }

    /// `(mesh_world, arm_world)` of every node in pre-order, at the trackers'
    /// current positions
    pub fn world_transforms(&self, parent: Mat4) -> Vec<(Mat4, Mat4)> {
        let mut transforms = Vec::with_capacity(self.node_count());
        self.collect_transforms(parent, &mut transforms);
        transforms
    }

    fn collect_transforms(&self, parent: Mat4, out: &mut Vec<(Mat4, Mat4)>) {
        let parent = parent * Mat4::from_translation(self.origin);
        let mesh_world = parent * math::rotate_y_deg(self.rotation.peek());
        let arm_world = parent * math::rotate_y_deg(self.arm_rotation.peek());
        out.push((mesh_world, arm_world));

        if let Some(left) = &self.left {
            left.collect_transforms(arm_world * hang_offset(-self.radius), out);
        }
        if let Some(right) = &self.right {
            right.collect_transforms(arm_world * hang_offset(self.radius), out);
        }
    }

    /// Bounding box of every mesh vertex in world space, at the trackers'
    /// current positions
    pub fn bounds(&self) -> CoreResult<Bounds> {
        let mut points = Vec::new();
        self.collect_points(Mat4::IDENTITY, &mut points);
        Bounds::from_points(&points)
    }

    fn collect_points(&self, parent: Mat4, out: &mut Vec<Vec3>) {
        let parent = parent * Mat4::from_translation(self.origin);
        let mesh_world = parent * math::rotate_y_deg(self.rotation.peek());
        out.extend(
            self.mesh
                .vertices()
                .iter()
                .map(|v| mesh_world.transform_point3(*v)),
        );

        let arm_world = parent * math::rotate_y_deg(self.arm_rotation.peek());
        if let Some(left) = &self.left {
            left.collect_points(arm_world * hang_offset(-self.radius), out);
        }
        if let Some(right) = &self.right {
            right.collect_points(arm_world * hang_offset(self.radius), out);
        }
    }

    /// Visit every node in pre-order
    pub fn for_each(&self, mut f: impl FnMut(&Mobile)) {
        self.visit(&mut f);
    }

    fn visit(&self, f: &mut dyn FnMut(&Mobile)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }

    /// Visit every node mutably in pre-order
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut Mobile)) {
        self.visit_mut(&mut f);
    }

    fn visit_mut(&mut self, f: &mut dyn FnMut(&mut Mobile)) {
        f(self);
        if let Some(left) = self.left.as_mut() {
            left.visit_mut(f);
        }
        if let Some(right) = self.right.as_mut() {
            right.visit_mut(f);
        }
    }

    /// Start both trackers of every node
    pub fn start_all(&mut self, now: f64) {
        self.for_each_mut(|node| {
            node.rotation.start(now);
            node.arm_rotation.start(now);
        });
    }

    /// Stop both trackers of every node
    pub fn stop_all(&mut self, now: f64) {
        self.for_each_mut(|node| {
            node.rotation.stop(now);
            node.arm_rotation.stop(now);
        });
    }

    pub fn node_count(&self) -> usize {
        1 + self.children().map(Mobile::node_count).sum::<usize>()
    }

    /// Number of levels, counting the root
    pub fn depth(&self) -> usize {
        1 + self.children().map(Mobile::depth).max().unwrap_or(0)
    }

    /// Present children, left first
    pub fn children(&self) -> impl Iterator<Item = &Mobile> {
        self.left.as_deref().into_iter().chain(self.right.as_deref())
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn arms(&self) -> &WireMesh {
        &self.arms
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn parent_height(&self) -> f32 {
        self.parent_height
    }

    pub fn child_height(&self) -> Option<f32> {
        self.child_height
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn left(&self) -> Option<&Mobile> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Mobile> {
        self.right.as_deref()
    }

    pub fn left_mut(&mut self) -> Option<&mut Mobile> {
        self.left.as_deref_mut()
    }

    pub fn right_mut(&mut self) -> Option<&mut Mobile> {
        self.right.as_deref_mut()
    }

    /// Mesh spin tracker
    pub fn rotation(&self) -> &AnimationTracker {
        &self.rotation
    }

    pub fn rotation_mut(&mut self) -> &mut AnimationTracker {
        &mut self.rotation
    }

    /// Arm spin tracker
    pub fn arm_rotation(&self) -> &AnimationTracker {
        &self.arm_rotation
    }

    pub fn arm_rotation_mut(&mut self) -> &mut AnimationTracker {
        &mut self.arm_rotation
    }
}

fn hang_offset(x: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, 0.0, 0.0))
}
