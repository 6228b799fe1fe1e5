/// Wireframe geometry for the spaceship
use nalgebra::Point3;

/// A 3D vertex position
pub type Vertex = Point3<f32>;

/// A line segment between two points in model space
pub type Segment = (Point3<f32>, Point3<f32>);

/// Tip of the pyramid drawn on top of the cube
pub const NOSE: [f32; 3] = [0.0, 0.8, 0.0];

/// Indices of the vertices forming the cube's top face (y = +0.5)
pub const TOP_FACE: [usize; 4] = [0, 1, 4, 5];

/// An unordered pair of indices into a mesh's vertex list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    /// Whether both edges connect the same two vertices, in either direction
    pub fn same_as(&self, other: &Edge) -> bool {
        (self.0 == other.0 && self.1 == other.1) || (self.0 == other.1 && self.1 == other.0)
    }
}

/// A unit cube wireframe with a nose point on top.
///
/// The geometry is fixed at construction; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: [Vertex; 8],
    edges: [Edge; 12],
    nose: Point3<f32>,
}

impl Mesh {
    /// The spaceship: a cube of side 1 centred on the origin
    pub fn spaceship() -> Self {
        let half = 0.5;
        Self {
            vertices: [
                Point3::new(half, half, half),
                Point3::new(half, half, -half),
                Point3::new(half, -half, half),
                Point3::new(half, -half, -half),
                Point3::new(-half, half, half),
                Point3::new(-half, half, -half),
                Point3::new(-half, -half, half),
                Point3::new(-half, -half, -half),
            ],
            edges: [
                // Right face
                Edge(0, 1),
                Edge(1, 3),
                Edge(3, 2),
                Edge(2, 0),
                // Left face
                Edge(4, 5),
                Edge(5, 7),
                Edge(7, 6),
                Edge(6, 4),
                // Connections between faces
                Edge(0, 4),
                Edge(1, 5),
                Edge(2, 6),
                Edge(3, 7),
            ],
            nose: Point3::from(NOSE),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edge_indices(&self) -> &[Edge] {
        &self.edges
    }

    /// Segments of the base cube wireframe, in edge order
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        self.edges
            .iter()
            .map(|&Edge(a, b)| (self.vertices[a], self.vertices[b]))
    }

    /// Segments from each top-face vertex up to the nose
    pub fn spaceship_lines(&self) -> impl Iterator<Item = Segment> + '_ {
        TOP_FACE
            .iter()
            .map(|&index| (self.vertices[index], self.nose))
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::spaceship()
    }
}
