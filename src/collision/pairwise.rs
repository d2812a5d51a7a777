use crate::collision::{CollisionResult, DistanceResult, QueryError};
use crate::geometry::CollisionObject;
use crate::math::Real;
use parry::query::{self, ClosestPoints, Unsupported};

fn unsupported(o1: &CollisionObject, o2: &CollisionObject) -> impl Fn(Unsupported) -> QueryError {
    let types = (o1.geometry().geometry_type(), o2.geometry().geometry_type());
    move |_| QueryError::Unsupported(types.0, types.1)
}

/// Tests whether two collision objects intersect.
///
/// If they do, the deepest contact is computed as well, when the backend supports it
/// for this pair of geometries.
pub fn collide(o1: &CollisionObject, o2: &CollisionObject) -> Result<CollisionResult, QueryError> {
    let (pos1, pos2) = (o1.shape_pose(), o2.shape_pose());
    let intersecting = query::intersection_test(&pos1, o1.shape(), &pos2, o2.shape())
        .map_err(unsupported(o1, o2))?;

    let contact = if intersecting {
        query::contact(&pos1, o1.shape(), &pos2, o2.shape(), 0.0)
            .ok()
            .flatten()
    } else {
        None
    };

    Ok(CollisionResult {
        intersecting,
        contact,
    })
}

/// Computes the distance separating two collision objects.
pub fn distance(o1: &CollisionObject, o2: &CollisionObject) -> Result<DistanceResult, QueryError> {
    let (pos1, pos2) = (o1.shape_pose(), o2.shape_pose());
    let min_distance =
        query::distance(&pos1, o1.shape(), &pos2, o2.shape()).map_err(unsupported(o1, o2))?;

    let nearest_points = if min_distance > 0.0 {
        match query::closest_points(&pos1, o1.shape(), &pos2, o2.shape(), Real::MAX) {
            Ok(ClosestPoints::WithinMargin(p1, p2)) => Some([p1, p2]),
            _ => None,
        }
    } else {
        None
    };

    Ok(DistanceResult {
        min_distance,
        nearest_points,
    })
}
