mod phone_tests;
