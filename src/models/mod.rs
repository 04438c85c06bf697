pub mod announcement;
pub mod assignment;
pub mod course;
pub mod doubt;
pub mod enrollment;
pub mod schedule;
pub mod user;

pub use announcement::{Announcement, NewAnnouncementRequest, UpdateAnnouncementRequest};
pub use assignment::{Assignment, NewAssignmentRequest, UpdateAssignmentRequest};
pub use course::{Course, MAX_VIDEO_NUM, NewCourseRequest, UpdateCourseRequest};
pub use doubt::{Doubt, DoubtAnswer, DoubtTag, NewDoubtAnswerRequest, NewDoubtRequest, UpdateDoubtRequest};
pub use enrollment::{EnrolledCourse, NewEnrollmentRequest, UpdateEnrollmentRequest};
pub use schedule::{NewScheduleRequest, Schedule, UpdateScheduleRequest};
pub use user::{NewUserRequest, UpdateUserRequest, User, WishlistRequest};
