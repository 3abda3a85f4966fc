mod task_lifecycle_tests;
